//! Beobachter für einzelne Simulationsschritte.

/// Callbacks pro Fixed-Step der `ChainWorld`.
///
/// Alle Methoden sind No-Ops, Implementierungen überschreiben nur das Nötige
/// (Diagnose, Tests, Profiling).
pub trait StepObserver {
    /// Nach der Integration aller Bodies.
    fn on_integrate(&mut self) {}

    /// Nach jeder Constraint-Iteration.
    fn on_constraint_iteration(&mut self, _iteration: usize) {}

    /// Ein Body ist eingeschlafen.
    fn on_body_sleep(&mut self, _body: crate::BodyHandle) {}

    /// Fixed-Step vollständig abgeschlossen.
    fn on_step_complete(&mut self) {}
}

/// Observer ohne Wirkung.
pub struct NoOpStepObserver;

impl StepObserver for NoOpStepObserver {}
