use std::fmt;
use std::ops::{BitAnd, BitOr};

use crate::requirement::Requirement;

/// Access condition in disjunctive normal form.
///
/// Each clause is a [`Requirement`] read as a conjunction; the gate opens when
/// any single clause is fully held. Clauses are kept in construction order and
/// duplicates are tolerated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Gate {
    clauses: Vec<Requirement>,
}

impl Gate {
    /// The "no requirement" gate: a single empty clause, open for any held set.
    pub fn none() -> Gate {
        Gate {
            clauses: vec![Requirement::NONE],
        }
    }

    /// One alternative per flag of `set`. An empty set yields [`Gate::none`].
    pub fn any_of(set: Requirement) -> Gate {
        if set.is_none() {
            return Gate::none();
        }

        Gate {
            clauses: set.decompose(),
        }
    }

    /// Clauses in construction order. The product of two multi-clause gates
    /// is normalized instead: ordered by size with subsumed clauses dropped.
    pub fn clauses(&self) -> &[Requirement] {
        &self.clauses
    }

    pub fn satisfied_by(&self, held: Requirement) -> bool {
        self.clauses.iter().any(|&clause| held.contains(clause))
    }

    /// Adds `requirement` to every clause.
    pub fn and(&self, requirement: Requirement) -> Gate {
        Gate {
            clauses: self
                .clauses
                .iter()
                .map(|&clause| clause | requirement)
                .collect(),
        }
    }

    /// Alternative paths: the clauses of both gates, `self` first.
    pub fn or(&self, other: &Gate) -> Gate {
        let mut clauses = Vec::with_capacity(self.clauses.len() + other.clauses.len());
        clauses.extend_from_slice(&self.clauses);
        clauses.extend_from_slice(&other.clauses);
        Gate { clauses }
    }

    /// Conjunction of two gates, distributed over their clauses.
    ///
    /// A single-clause operand is folded in with [`Gate::and`]. The cross
    /// product of two multi-clause gates drops clauses that are supersets of
    /// another product clause, which never changes what the gate accepts.
    pub fn and_gate(&self, other: &Gate) -> Gate {
        match (self.clauses.as_slice(), other.clauses.as_slice()) {
            (_, [single]) => self.and(*single),
            ([single], _) => other.and(*single),
            (lhs, rhs) => {
                let mut product = Vec::with_capacity(lhs.len() * rhs.len());
                for &a in lhs {
                    for &b in rhs {
                        product.push(a | b);
                    }
                }
                Gate {
                    clauses: absorb(product),
                }
            }
        }
    }
}

fn absorb(mut clauses: Vec<Requirement>) -> Vec<Requirement> {
    clauses.sort_by_key(|clause| clause.flag_count());

    let mut kept: Vec<Requirement> = Vec::with_capacity(clauses.len());
    for clause in clauses {
        if !kept.iter().any(|&smaller| clause.contains(smaller)) {
            kept.push(clause);
        }
    }
    kept
}

impl From<Requirement> for Gate {
    fn from(requirement: Requirement) -> Gate {
        Gate {
            clauses: vec![requirement],
        }
    }
}

impl From<&Gate> for Gate {
    fn from(gate: &Gate) -> Gate {
        gate.clone()
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, clause) in self.clauses.iter().enumerate() {
            if i > 0 {
                f.write_str(" or ")?;
            }
            if clause.is_none() {
                f.write_str("(none)")?;
            } else {
                write!(f, "({clause})")?;
            }
        }
        Ok(())
    }
}

impl BitAnd for Requirement {
    type Output = Gate;

    fn bitand(self, rhs: Requirement) -> Gate {
        Gate::from(self | rhs)
    }
}

macro_rules! impl_gate_requirement_ops {
    ($lhs:ty) => {
        impl BitOr<Requirement> for $lhs {
            type Output = Gate;

            fn bitor(self, rhs: Requirement) -> Gate {
                self.or(&Gate::from(rhs))
            }
        }

        impl BitAnd<Requirement> for $lhs {
            type Output = Gate;

            fn bitand(self, rhs: Requirement) -> Gate {
                self.and(rhs)
            }
        }

        impl BitOr<$lhs> for Requirement {
            type Output = Gate;

            fn bitor(self, rhs: $lhs) -> Gate {
                Gate::from(self).or(&rhs)
            }
        }

        impl BitAnd<$lhs> for Requirement {
            type Output = Gate;

            fn bitand(self, rhs: $lhs) -> Gate {
                rhs.and(self)
            }
        }
    };
}

macro_rules! impl_gate_gate_ops {
    ($lhs:ty, $rhs:ty) => {
        impl BitOr<$rhs> for $lhs {
            type Output = Gate;

            fn bitor(self, rhs: $rhs) -> Gate {
                self.or(&rhs)
            }
        }

        impl BitAnd<$rhs> for $lhs {
            type Output = Gate;

            fn bitand(self, rhs: $rhs) -> Gate {
                self.and_gate(&rhs)
            }
        }
    };
}

impl_gate_requirement_ops!(Gate);
impl_gate_requirement_ops!(&Gate);
impl_gate_gate_ops!(Gate, Gate);
impl_gate_gate_ops!(Gate, &Gate);
impl_gate_gate_ops!(&Gate, Gate);
impl_gate_gate_ops!(&Gate, &Gate);
