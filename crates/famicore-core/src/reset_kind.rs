/// Distinguishes a cold boot from a warm reset.
///
/// The console's reset button leaves work RAM and a few register values
/// intact, while a power cycle clears everything. Components receive the
/// kind so each can apply the right subset of its reset sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResetKind {
    /// Full power cycle: all memory and registers return to power-on state.
    PowerOn,
    /// Reset-button press: RAM contents survive, registers reinitialize.
    Soft,
}
