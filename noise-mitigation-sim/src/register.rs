//! Minimal per-shot qubit bookkeeping.
//!
//! Instead of a state vector, each qubit is either settled in a
//! computational-basis value or belongs to a superposition group. Every
//! member of a group shares one fair coin, drawn lazily the first time any
//! member is measured or disturbed, and reads `coin ^ flip`. Hadamard opens
//! a group, CNOT from a superposed control links its target into the group,
//! so Bell and GHZ correlations come out of a single coin flip.
//!
//! Only computational-basis statistics are tracked. A group also carries
//! the sign of a lone |±⟩ qubit so that H·H, H·Z·H and CNOT phase kickback
//! from a |−⟩ target behave as expected. Interference between members of a
//! multi-qubit group is out of reach; [`check_supported`] refuses circuits
//! that would need it, and the simulator runs that check before any shot.

use rand::Rng;

use crate::circuit::{Circuit, Gate, SingleQubitGate, TwoQubitGate};
use crate::error::{Result, SimError};
use crate::outcome::Outcome;

/// State of one qubit within a shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QubitState {
    /// Definite computational-basis value.
    Basis(bool),
    /// Unresolved member of a superposition group; reads `coin ^ flip`.
    Superposed { group: usize, flip: bool },
}

#[derive(Debug, Clone, Copy)]
struct Group {
    /// Unresolved qubits still linked to this group.
    members: usize,
    /// Relative sign: a lone member is |+⟩ when false and |−⟩ when true.
    phase: bool,
}

/// Qubit register for a single stochastic shot.
#[derive(Debug, Clone)]
pub struct Register {
    qubits: Vec<QubitState>,
    groups: Vec<Group>,
}

impl Register {
    /// All qubits start in |0⟩.
    pub fn new(num_qubits: usize) -> Self {
        Self {
            qubits: vec![QubitState::Basis(false); num_qubits],
            groups: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.qubits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.qubits.is_empty()
    }

    pub fn state(&self, qubit: usize) -> QubitState {
        self.qubits[qubit]
    }

    /// Apply the ideal effect of `gate`.
    ///
    /// `gate` must come from a validated [`crate::circuit::Circuit`] of the
    /// same size; indices are not rechecked.
    pub fn apply<R: Rng + ?Sized>(&mut self, gate: &Gate, rng: &mut R) {
        match *gate {
            Gate::Single {
                gate: SingleQubitGate::H,
                target,
            } => self.hadamard(target, rng),
            Gate::Single {
                gate: SingleQubitGate::X,
                target,
            } => self.pauli_x(target),
            Gate::Single {
                gate: SingleQubitGate::Z,
                target,
            } => self.pauli_z(target),
            Gate::Two {
                gate: TwoQubitGate::Cx,
                control,
                target,
            } => self.cnot(control, target, rng),
        }
    }

    /// Replace `qubit` by a fresh fair random bit, independent of everything
    /// else in the register.
    ///
    /// A linked qubit is traced out: its partners settle on the group's own
    /// coin first, so they keep their mutual correlation but lose any with
    /// `qubit`.
    pub fn depolarize<R: Rng + ?Sized>(&mut self, qubit: usize, rng: &mut R) {
        if let QubitState::Superposed { group, .. } = self.qubits[qubit] {
            if self.groups[group].members > 1 {
                self.collapse(group, rng);
            } else {
                self.groups[group].members = 0;
            }
        }
        let bit: bool = rng.gen();
        self.qubits[qubit] = QubitState::Basis(bit);
    }

    /// Measure one qubit in the computational basis.
    pub fn measure<R: Rng + ?Sized>(&mut self, qubit: usize, rng: &mut R) -> bool {
        match self.qubits[qubit] {
            QubitState::Basis(bit) => bit,
            QubitState::Superposed { group, flip } => {
                let coin: bool = rng.gen();
                self.resolve(group, coin);
                coin ^ flip
            }
        }
    }

    /// Measure every qubit, q0 first.
    pub fn measure_all<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Outcome {
        (0..self.qubits.len()).map(|q| self.measure(q, rng)).collect()
    }

    fn hadamard<R: Rng + ?Sized>(&mut self, qubit: usize, rng: &mut R) {
        if let QubitState::Superposed { group, .. } = self.qubits[qubit] {
            if self.groups[group].members == 1 {
                // H|±⟩ = |0⟩ / |1⟩
                let phase = self.groups[group].phase;
                self.groups[group].members = 0;
                self.qubits[qubit] = QubitState::Basis(phase);
                return;
            }
            self.collapse(group, rng);
        }
        if let QubitState::Basis(bit) = self.qubits[qubit] {
            let group = self.open_group(bit);
            self.qubits[qubit] = QubitState::Superposed { group, flip: false };
        }
    }

    fn pauli_x(&mut self, qubit: usize) {
        self.qubits[qubit] = match self.qubits[qubit] {
            QubitState::Basis(bit) => QubitState::Basis(!bit),
            QubitState::Superposed { group, flip } => QubitState::Superposed { group, flip: !flip },
        };
    }

    fn pauli_z(&mut self, qubit: usize) {
        if let QubitState::Superposed { group, .. } = self.qubits[qubit] {
            self.groups[group].phase ^= true;
        }
    }

    fn cnot<R: Rng + ?Sized>(&mut self, control: usize, target: usize, rng: &mut R) {
        let (control_group, control_flip) = match self.qubits[control] {
            QubitState::Basis(true) => return self.pauli_x(target),
            QubitState::Basis(false) => return,
            QubitState::Superposed { group, flip } => (group, flip),
        };

        if let QubitState::Superposed { group, flip } = self.qubits[target] {
            if group == control_group {
                // t ^= c cancels the shared coin
                self.groups[group].members -= 1;
                self.qubits[target] = QubitState::Basis(flip ^ control_flip);
                return;
            }
            if self.groups[group].members == 1 {
                // |±⟩ target is an X eigenstate: only its sign kicks back.
                if self.groups[group].phase {
                    self.pauli_z(control);
                }
                return;
            }
            self.collapse(group, rng);
        }

        if let QubitState::Basis(bit) = self.qubits[target] {
            self.groups[control_group].members += 1;
            self.qubits[target] = QubitState::Superposed {
                group: control_group,
                flip: bit ^ control_flip,
            };
        }
    }

    fn open_group(&mut self, phase: bool) -> usize {
        self.groups.push(Group { members: 1, phase });
        self.groups.len() - 1
    }

    fn collapse<R: Rng + ?Sized>(&mut self, group: usize, rng: &mut R) {
        let coin: bool = rng.gen();
        self.resolve(group, coin);
    }

    /// Settle every member of `group` to `coin ^ flip`.
    fn resolve(&mut self, group: usize, coin: bool) {
        for state in self.qubits.iter_mut() {
            if let QubitState::Superposed { group: g, flip } = *state {
                if g == group {
                    *state = QubitState::Basis(coin ^ flip);
                }
            }
        }
        self.groups[group].members = 0;
    }
}

/// Reject circuits whose statistics the register cannot reproduce exactly.
///
/// Walks the gates once without randomness, tracking which qubits may share
/// a coin. Every H opens a possible superposition and every CNOT from such a
/// control links its target, whatever noise does at run time, so the linked
/// sets are an over-approximation of any shot. Two shapes are refused:
/// - H on a qubit that may be linked to another qubit (interference between
///   group members is not tracked)
/// - CNOT from a possibly superposed control onto a target already linked
///   into a different multi-qubit group
pub fn check_supported(circuit: &Circuit) -> Result<()> {
    // links[q] = index into `sizes` of the set q may belong to
    let mut links: Vec<Option<usize>> = vec![None; circuit.num_qubits()];
    let mut sizes: Vec<usize> = Vec::new();

    for (position, op) in circuit.gates().iter().enumerate() {
        match *op {
            Gate::Single {
                gate: SingleQubitGate::H,
                target,
            } => match links[target] {
                Some(set) if sizes[set] > 1 => {
                    return Err(SimError::unsupported(op.name(), position, target));
                }
                Some(_) => {}
                None => {
                    sizes.push(1);
                    links[target] = Some(sizes.len() - 1);
                }
            },
            Gate::Single { .. } => {}
            Gate::Two {
                gate: TwoQubitGate::Cx,
                control,
                target,
            } => {
                let Some(control_set) = links[control] else {
                    continue;
                };
                match links[target] {
                    Some(set) if set == control_set => {}
                    Some(set) if sizes[set] > 1 => {
                        return Err(SimError::unsupported(op.name(), position, target));
                    }
                    Some(set) => {
                        sizes[set] -= 1;
                        sizes[control_set] += 1;
                        links[target] = Some(control_set);
                    }
                    None => {
                        sizes[control_set] += 1;
                        links[target] = Some(control_set);
                    }
                }
            }
        }
    }
    Ok(())
}
