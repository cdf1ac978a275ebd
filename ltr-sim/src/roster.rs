//! Built-in demo roster
//!
//! Six competitors on a ~1:35 circuit, gridded in roster order.

use ltr_core::{CompetitorDef, Roster};
use tracing::warn;

pub fn default_competitors() -> Vec<CompetitorDef> {
    vec![
        CompetitorDef::new("27", "ROSSI Marco", 95_000, 1).with_variation(vec![234, -180, 410, 0, -95]),
        CompetitorDef::new("14", "BIANCHI Luca", 95_300, 2).with_variation(vec![512, -240, 130]),
        CompetitorDef::new("55", "VERDI Giuseppe", 95_600, 3).with_variation(vec![-300, 891, 0, 220]),
        CompetitorDef::new("8", "NERI Alessandro", 96_100, 4).with_variation(vec![234, 640, -410]),
        CompetitorDef::new("33", "GIALLI Franco", 96_500, 5).with_variation(vec![102, -350, 760, 15]),
        CompetitorDef::new("71", "RUSSO Antonio", 97_000, 6).with_variation(vec![456, -120]),
    ]
}

pub fn default_roster() -> Roster {
    Roster::new(default_competitors()).unwrap_or_else(|e| {
        warn!("Built-in roster rejected ({}), serving an empty race", e);
        Roster::default()
    })
}
