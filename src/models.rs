use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Green,
    Yellow,
    Red,
    Gray,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Status::Green => "green",
            Status::Yellow => "yellow",
            Status::Red => "red",
            Status::Gray => "gray",
        };
        write!(f, "{label}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidReason {
    NoClasses,
    AttendedExceedsTotal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Advice {
    SafeToMiss { classes: u32 },
    OnTheEdge,
    MustAttend { classes: u32 },
    TargetUnreachable,
    Invalid { reason: InvalidReason },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AttendanceInput {
    pub total: u32,
    pub attended: u32,
    pub min_percent: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Projection {
    pub future_misses: u32,
    pub percent: f64,
    pub status: Status,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttendanceSummary {
    pub input: AttendanceInput,
    pub current_percent: f64,
    pub status: Status,
    pub advice: Advice,
    pub after_one_miss_percent: f64,
    pub after_one_miss_status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projection: Option<Projection>,
}

#[derive(Debug, Clone)]
pub struct ClassRecord {
    pub name: String,
    pub input: AttendanceInput,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassStanding {
    pub name: String,
    pub summary: AttendanceSummary,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusSummary {
    pub status: Status,
    pub count: usize,
    pub avg_percent: f64,
}
