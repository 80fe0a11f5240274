use crossterm::event::Event as CrosstermEvent;

#[derive(Debug)]
pub enum AppEvent {
    /// Terminal input event
    Terminal(CrosstermEvent),

    /// A scheduled watchdog expiry was delivered
    IdleTimeout { generation: u64 },

    /// Tick for UI refresh
    Tick,
}
