/// Visitor interactions that push the watchdog back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityKind {
    Click,
    TouchEnd,
    Key,
}

#[derive(Debug, PartialEq)]
pub enum Action {
    Activity { kind: ActivityKind },
    IdleExpired { generation: u64 },
    Navigate { location: String },
    Back,
    Forward,
    Home,
    ShowStatus,
    Quit,
}
