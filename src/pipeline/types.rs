use std::fmt;

use serde::Serialize;

/// The four pipeline stages, in the only order they may run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StageKind {
    Design,
    Lectures,
    Slides,
    Report,
}

impl StageKind {
    pub const ORDER: [StageKind; 4] = [
        StageKind::Design,
        StageKind::Lectures,
        StageKind::Slides,
        StageKind::Report,
    ];

    /// Phase reached once this stage has completed.
    pub fn completes(self) -> RunPhase {
        match self {
            StageKind::Design => RunPhase::DesignedCurriculum,
            StageKind::Lectures => RunPhase::LecturesWritten,
            StageKind::Slides => RunPhase::SlidesGenerated,
            StageKind::Report => RunPhase::Reported,
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StageKind::Design => "design",
            StageKind::Lectures => "lectures",
            StageKind::Slides => "slides",
            StageKind::Report => "report",
        };
        write!(f, "{label}")
    }
}

/// Linear progress of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub enum RunPhase {
    #[default]
    Init,
    DesignedCurriculum,
    LecturesWritten,
    SlidesGenerated,
    Reported,
}

impl RunPhase {
    pub fn next(self) -> Option<RunPhase> {
        match self {
            RunPhase::Init => Some(RunPhase::DesignedCurriculum),
            RunPhase::DesignedCurriculum => Some(RunPhase::LecturesWritten),
            RunPhase::LecturesWritten => Some(RunPhase::SlidesGenerated),
            RunPhase::SlidesGenerated => Some(RunPhase::Reported),
            RunPhase::Reported => None,
        }
    }
}
