//! Bounded status waits shared by the SPI and UART drivers

use tether_core::PollBudget;

/// Status condition being waited on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Stage {
    /// Transmit register empty
    TxReady,
    /// Last byte fully shifted out
    TxComplete,
    /// Received byte available
    RxReady,
}

/// A status wait that ran out of budget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timeout {
    /// Condition that never came true
    pub stage: Stage,
    /// Byte position reached; bytes before it were transferred
    pub index: usize,
}

/// Poll `ready` within `budget`, reporting which wait gave up
pub(crate) fn wait_for(
    budget: PollBudget,
    stage: Stage,
    index: usize,
    ready: impl FnMut() -> bool,
) -> Result<(), Timeout> {
    if budget.poll_until(ready) {
        return Ok(());
    }

    #[cfg(feature = "defmt")]
    defmt::trace!(
        "{} timed out at byte {=usize} after {=u32} polls",
        stage,
        index,
        budget.get()
    );

    Err(Timeout { stage, index })
}
