//! Circuit model: an ordered gate list over a fixed register plus a
//! terminal measure-all declaration.
//!
//! The model is pure data. Nothing here executes; see
//! [`crate::simulation`] for sampling.

use std::fmt;

use smallvec::{smallvec, SmallVec};

use crate::error::{Result, SimError};

/// Number of qubits a gate (or an error channel) acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arity {
    One,
    Two,
}

impl Arity {
    /// Number of qubits touched.
    pub fn qubits(self) -> usize {
        match self {
            Arity::One => 1,
            Arity::Two => 2,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-qubit", self.qubits())
    }
}

/// Single-qubit gate kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SingleQubitGate {
    /// Hadamard.
    H,
    /// Pauli X (bit flip).
    X,
    /// Pauli Z (phase flip).
    Z,
}

impl SingleQubitGate {
    pub fn name(self) -> &'static str {
        match self {
            SingleQubitGate::H => "h",
            SingleQubitGate::X => "x",
            SingleQubitGate::Z => "z",
        }
    }

    fn symbol(self) -> char {
        match self {
            SingleQubitGate::H => 'H',
            SingleQubitGate::X => 'X',
            SingleQubitGate::Z => 'Z',
        }
    }
}

/// Two-qubit gate kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TwoQubitGate {
    /// Controlled-NOT.
    Cx,
}

impl TwoQubitGate {
    pub fn name(self) -> &'static str {
        match self {
            TwoQubitGate::Cx => "cx",
        }
    }
}

/// One gate application inside a circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gate {
    Single {
        gate: SingleQubitGate,
        target: usize,
    },
    Two {
        gate: TwoQubitGate,
        control: usize,
        target: usize,
    },
}

impl Gate {
    pub fn h(target: usize) -> Self {
        Gate::Single {
            gate: SingleQubitGate::H,
            target,
        }
    }

    pub fn x(target: usize) -> Self {
        Gate::Single {
            gate: SingleQubitGate::X,
            target,
        }
    }

    pub fn z(target: usize) -> Self {
        Gate::Single {
            gate: SingleQubitGate::Z,
            target,
        }
    }

    pub fn cx(control: usize, target: usize) -> Self {
        Gate::Two {
            gate: TwoQubitGate::Cx,
            control,
            target,
        }
    }

    /// Name used to look up the gate's error channel.
    pub fn name(&self) -> &'static str {
        match self {
            Gate::Single { gate, .. } => gate.name(),
            Gate::Two { gate, .. } => gate.name(),
        }
    }

    pub fn arity(&self) -> Arity {
        match self {
            Gate::Single { .. } => Arity::One,
            Gate::Two { .. } => Arity::Two,
        }
    }

    /// Qubits touched by the gate, control first for two-qubit gates.
    pub fn qubits(&self) -> SmallVec<[usize; 2]> {
        match *self {
            Gate::Single { target, .. } => smallvec![target],
            Gate::Two {
                control, target, ..
            } => smallvec![control, target],
        }
    }
}

/// An ordered gate sequence over `num_qubits` qubits.
///
/// Invariant: every qubit index referenced by a stored gate is below
/// `num_qubits`, and two-qubit gates never use one qubit twice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Circuit {
    num_qubits: usize,
    gates: Vec<Gate>,
    measure_all: bool,
}

impl Circuit {
    /// Create an empty circuit over `num_qubits` qubits, all starting in |0⟩.
    pub fn new(num_qubits: usize) -> Self {
        Self {
            num_qubits,
            gates: Vec::new(),
            measure_all: false,
        }
    }

    /// The reference circuit: H on q0, CNOT(q0, q1), measure all.
    pub fn bell_pair() -> Self {
        let mut circuit = Circuit::new(2);
        circuit.gates.push(Gate::h(0));
        circuit.gates.push(Gate::cx(0, 1));
        circuit.measure_all();
        circuit
    }

    /// GHZ preparation over `num_qubits` qubits: H on q0 followed by a CNOT
    /// chain q0→q1→…, then measure all. Two qubits give the Bell pair.
    pub fn ghz(num_qubits: usize) -> Result<Self> {
        let mut circuit = Circuit::new(num_qubits);
        circuit.append(Gate::h(0))?;
        for q in 1..num_qubits {
            circuit.append(Gate::cx(q - 1, q))?;
        }
        circuit.measure_all();
        Ok(circuit)
    }

    /// Append a gate, rejecting out-of-range or repeated qubit indices.
    pub fn append(&mut self, gate: Gate) -> Result<()> {
        for q in gate.qubits() {
            if q >= self.num_qubits {
                return Err(SimError::invalid_qubit(q, self.num_qubits));
            }
        }
        if let Gate::Two {
            gate: kind,
            control,
            target,
        } = gate
        {
            if control == target {
                return Err(SimError::DuplicateQubit {
                    gate: kind.name(),
                    qubit: control,
                });
            }
        }
        self.gates.push(gate);
        Ok(())
    }

    /// Declare a terminal measurement of the full register. Idempotent.
    pub fn measure_all(&mut self) {
        self.measure_all = true;
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    pub fn measures_all(&self) -> bool {
        self.measure_all
    }

    /// Number of gates (measurement excluded).
    pub fn len(&self) -> usize {
        self.gates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }
}

/// Text diagram, one wire per qubit, one column per gate:
///
/// ```text
/// q_0: ─H──●──M─
/// q_1: ────X──M─
/// ```
impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<String> = (0..self.num_qubits).map(|q| format!("q_{q}: ")).collect();
        let label_width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        let mut rows: Vec<String> = labels
            .iter()
            .map(|l| format!("{:>width$}", l, width = label_width))
            .collect();

        for gate in &self.gates {
            for (q, row) in rows.iter_mut().enumerate() {
                let cell = match *gate {
                    Gate::Single { gate, target } if target == q => gate.symbol(),
                    Gate::Single { .. } => '─',
                    Gate::Two {
                        control, target, ..
                    } => {
                        let (lo, hi) = (control.min(target), control.max(target));
                        if q == control {
                            '●'
                        } else if q == target {
                            'X'
                        } else if lo < q && q < hi {
                            '┼'
                        } else {
                            '─'
                        }
                    }
                };
                row.push('─');
                row.push(cell);
                row.push('─');
            }
        }

        if self.measure_all {
            for row in rows.iter_mut() {
                row.push_str("─M─");
            }
        }

        write!(f, "{}", rows.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_circuit_is_empty() {
        let c = Circuit::new(3);
        assert_eq!(c.num_qubits(), 3);
        assert!(c.is_empty());
        assert!(!c.measures_all());
    }

    #[test]
    fn test_append_rejects_out_of_range_target() {
        let mut c = Circuit::new(2);
        let err = c.append(Gate::h(2)).unwrap_err();
        assert_eq!(err, SimError::invalid_qubit(2, 2));
        assert!(c.is_empty(), "Rejected gate must not be stored");
    }

    #[test]
    fn test_append_rejects_out_of_range_control() {
        let mut c = Circuit::new(2);
        assert_eq!(
            c.append(Gate::cx(5, 1)).unwrap_err(),
            SimError::invalid_qubit(5, 2)
        );
    }

    #[test]
    fn test_append_rejects_repeated_qubit() {
        let mut c = Circuit::new(2);
        assert_eq!(
            c.append(Gate::cx(1, 1)).unwrap_err(),
            SimError::DuplicateQubit { gate: "cx", qubit: 1 }
        );
    }

    #[test]
    fn test_zero_qubit_circuit_rejects_everything() {
        let mut c = Circuit::new(0);
        assert!(c.append(Gate::x(0)).is_err());
    }

    #[test]
    fn test_measure_all_is_idempotent() {
        let mut c = Circuit::new(1);
        c.measure_all();
        c.measure_all();
        assert!(c.measures_all());
        assert_eq!(c.len(), 0);
    }

    #[test]
    fn test_bell_pair_layout() {
        let c = Circuit::bell_pair();
        assert_eq!(c.gates(), &[Gate::h(0), Gate::cx(0, 1)]);
        assert!(c.measures_all());
        assert_eq!(Circuit::ghz(2).unwrap(), c);
    }

    #[test]
    fn test_ghz_chain() {
        let c = Circuit::ghz(4).unwrap();
        assert_eq!(c.len(), 4);
        assert_eq!(c.gates()[3], Gate::cx(2, 3));
        assert!(Circuit::ghz(0).is_err());
    }

    #[test]
    fn test_gate_names_and_arity() {
        assert_eq!(Gate::h(0).name(), "h");
        assert_eq!(Gate::cx(0, 1).name(), "cx");
        assert_eq!(Gate::cx(0, 1).arity(), Arity::Two);
        assert_eq!(Gate::z(1).arity(), Arity::One);
        assert_eq!(Gate::cx(1, 0).qubits().as_slice(), &[1, 0]);
    }

    #[test]
    fn test_bell_pair_diagram() {
        let drawn = Circuit::bell_pair().to_string();
        assert_eq!(drawn, "q_0: ─H──●──M─\nq_1: ────X──M─");
    }

    #[test]
    fn test_diagram_marks_spanned_wires() {
        let mut c = Circuit::new(3);
        c.append(Gate::cx(2, 0)).unwrap();
        let drawn = c.to_string();
        let lines: Vec<&str> = drawn.lines().collect();
        assert_eq!(lines[0], "q_0: ─X─");
        assert_eq!(lines[1], "q_1: ─┼─");
        assert_eq!(lines[2], "q_2: ─●─");
    }
}
