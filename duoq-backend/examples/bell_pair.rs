//! Example preparing a Bell pair on both backends
//!
//! Runs the same circuit as dense gates and as Ising braids, samples both,
//! then moves a state between representations through the dispatch layer.

use duoq_backend::{apply_sequence, measure_state, GateBasedBackend, QuantumBackend, TopologicalBackend};
use duoq_compiler::lower_circuit;
use duoq_core::{Circuit, GateSpec, QuantumOperation, StateKind};
use duoq_state::convert;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Bell Pair on Two Backends ===\n");

    let mut circuit = Circuit::new(2)?;
    circuit.h(0)?.cnot(0, 1)?;

    let backends: Vec<Box<dyn QuantumBackend>> =
        vec![Box::new(GateBasedBackend::new()), Box::new(TopologicalBackend::new())];

    for backend in &backends {
        println!("{}", backend.description());
        let state = backend.execute_to_state(&circuit)?;
        let mut rng = StdRng::seed_from_u64(42);
        let shots = measure_state(&state, 1000, &mut rng)?;
        for (bits, count) in shots.counts() {
            println!("  |{}⟩: {}", bits, count);
        }
        println!();
    }

    let program = lower_circuit(&circuit, 2)?;
    println!("Braid word for {} gates: {:?}\n", program.gate_count, program.braids);

    println!("Dispatching a dense state to the topological backend");
    let dense = GateBasedBackend::new().initialize_state(2)?;
    let ops: Vec<QuantumOperation> = vec![
        GateSpec::H(0).into(),
        GateSpec::Cnot { control: 0, target: 1 }.into(),
        QuantumOperation::Measure(0),
    ];
    let topo = apply_sequence(&TopologicalBackend::new(), &ops, &dense)?;
    let back = convert(StateKind::StateVector, &topo)?;
    if let Some(state) = back.as_state_vector() {
        println!("  probabilities after measuring q0: {:?}", state.probabilities());
    }

    Ok(())
}
