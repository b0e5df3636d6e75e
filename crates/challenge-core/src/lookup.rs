//! Tickets de generación para lookups asíncronos.
//!
//! Cada lookup (skills, expertise, tabla renderizada por el servidor) emite
//! un ticket al iniciarse. Sólo la respuesta del último ticket emitido se
//! aplica; las demás se descartan.
use log::debug;
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupKind {
    Skills,
    Expertise,
    BountyTable,
}

impl LookupKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LookupKind::Skills => "skills",
            LookupKind::Expertise => "expertise",
            LookupKind::BountyTable => "bounty_table",
        }
    }
}

impl fmt::Display for LookupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupTicket {
    pub kind: LookupKind,
    pub generation: u64,
}

#[derive(Debug, Default)]
pub struct LookupGate {
    latest: HashMap<LookupKind, u64>,
}

impl LookupGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emite un ticket nuevo; invalida los anteriores del mismo tipo.
    pub fn issue(&mut self, kind: LookupKind) -> LookupTicket {
        let generation = self.latest.entry(kind).or_insert(0);
        *generation += 1;
        LookupTicket { kind,
                       generation: *generation }
    }

    pub fn is_current(&self, ticket: LookupTicket) -> bool {
        self.latest.get(&ticket.kind) == Some(&ticket.generation)
    }

    /// `true` si la respuesta del ticket debe aplicarse.
    pub fn accept(&self, ticket: LookupTicket) -> bool {
        let current = self.is_current(ticket);
        if !current {
            debug!("dropping stale {} response (generation {})", ticket.kind, ticket.generation);
        }
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_latest_ticket_is_accepted() {
        let mut gate = LookupGate::new();
        let first = gate.issue(LookupKind::Expertise);
        let second = gate.issue(LookupKind::Expertise);
        let skills = gate.issue(LookupKind::Skills);
        assert!(!gate.accept(first));
        assert!(gate.accept(second));
        assert!(gate.accept(skills));
    }
}
