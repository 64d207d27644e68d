use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Satellite catalog number (unique key of a registry record)
pub type SatId = u32;

/// Lowest identifier the application layer hands out
pub const MIN_ID: SatId = 10000;
/// Highest identifier the application layer hands out
pub const MAX_ID: SatId = 99999;

/// Error returned when a band or state name cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown {kind}: {value}")]
pub struct ParseBandError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseBandError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Orbital altitude band, in miles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AltitudeBand {
    #[default]
    MI208,
    MI215,
    MI340,
    MI350,
}

impl AltitudeBand {
    pub const ALL: [AltitudeBand; 4] = [
        AltitudeBand::MI208,
        AltitudeBand::MI215,
        AltitudeBand::MI340,
        AltitudeBand::MI350,
    ];

    pub fn miles(&self) -> u32 {
        match self {
            AltitudeBand::MI208 => 208,
            AltitudeBand::MI215 => 215,
            AltitudeBand::MI340 => 340,
            AltitudeBand::MI350 => 350,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AltitudeBand::MI208 => "208 mi",
            AltitudeBand::MI215 => "215 mi",
            AltitudeBand::MI340 => "340 mi",
            AltitudeBand::MI350 => "350 mi",
        }
    }
}

impl std::fmt::Display for AltitudeBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for AltitudeBand {
    type Err = ParseBandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().replace(' ', "").as_str() {
            "MI208" | "208MI" | "208" => Ok(AltitudeBand::MI208),
            "MI215" | "215MI" | "215" => Ok(AltitudeBand::MI215),
            "MI340" | "340MI" | "340" => Ok(AltitudeBand::MI340),
            "MI350" | "350MI" | "350" => Ok(AltitudeBand::MI350),
            _ => Err(ParseBandError::new("altitude band", s)),
        }
    }
}

/// Orbital inclination band, in degrees
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum InclinationBand {
    #[default]
    I48,
    I53,
    I70,
    I97,
}

impl InclinationBand {
    pub const ALL: [InclinationBand; 4] = [
        InclinationBand::I48,
        InclinationBand::I53,
        InclinationBand::I70,
        InclinationBand::I97,
    ];

    pub fn degrees(&self) -> u32 {
        match self {
            InclinationBand::I48 => 48,
            InclinationBand::I53 => 53,
            InclinationBand::I70 => 70,
            InclinationBand::I97 => 97,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InclinationBand::I48 => "48 deg",
            InclinationBand::I53 => "53 deg",
            InclinationBand::I70 => "70 deg",
            InclinationBand::I97 => "97 deg",
        }
    }
}

impl std::fmt::Display for InclinationBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for InclinationBand {
    type Err = ParseBandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().replace(' ', "").as_str() {
            "I48" | "48DEG" | "48" => Ok(InclinationBand::I48),
            "I53" | "53DEG" | "53" => Ok(InclinationBand::I53),
            "I70" | "70DEG" | "70" => Ok(InclinationBand::I70),
            "I97" | "97DEG" | "97" => Ok(InclinationBand::I97),
            _ => Err(ParseBandError::new("inclination band", s)),
        }
    }
}

/// Operational state of a satellite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum SatState {
    #[default]
    Active,
    Deorbited,
}

impl SatState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SatState::Active => "ACTIVE",
            SatState::Deorbited => "DEORBITED",
        }
    }
}

impl std::fmt::Display for SatState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SatState {
    type Err = ParseBandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" => Ok(SatState::Active),
            "deorbited" => Ok(SatState::Deorbited),
            _ => Err(ParseBandError::new("state", s)),
        }
    }
}

/// One satellite record.
///
/// The identifier is fixed at construction; bands and state may change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Satellite {
    id: SatId,
    pub alt: AltitudeBand,
    pub inclin: InclinationBand,
    #[serde(default)]
    pub state: SatState,
}

impl Satellite {
    /// Create an active satellite
    pub fn new(id: SatId, alt: AltitudeBand, inclin: InclinationBand) -> Self {
        Self {
            id,
            alt,
            inclin,
            state: SatState::Active,
        }
    }

    /// Create an active satellite with default bands
    pub fn with_id(id: SatId) -> Self {
        Self::new(id, AltitudeBand::default(), InclinationBand::default())
    }

    pub fn with_state(mut self, state: SatState) -> Self {
        self.state = state;
        self
    }

    pub fn id(&self) -> SatId {
        self.id
    }

    pub fn is_deorbited(&self) -> bool {
        self.state == SatState::Deorbited
    }

    /// Whether the id lies inside the application's `MIN_ID..=MAX_ID` window
    pub fn in_id_window(&self) -> bool {
        (MIN_ID..=MAX_ID).contains(&self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_satellite_creation() {
        let sat = Satellite::new(25544, AltitudeBand::MI215, InclinationBand::I53);
        assert_eq!(sat.id(), 25544);
        assert_eq!(sat.alt, AltitudeBand::MI215);
        assert_eq!(sat.inclin, InclinationBand::I53);
        assert_eq!(sat.state, SatState::Active);
        assert!(sat.in_id_window());
    }

    #[test]
    fn test_satellite_defaults() {
        let sat = Satellite::with_id(7).with_state(SatState::Deorbited);
        assert_eq!(sat.alt, AltitudeBand::MI208);
        assert_eq!(sat.inclin, InclinationBand::I48);
        assert!(sat.is_deorbited());
        assert!(!sat.in_id_window());
    }

    #[test]
    fn test_band_display() {
        assert_eq!(AltitudeBand::MI340.to_string(), "340 mi");
        assert_eq!(InclinationBand::I97.to_string(), "97 deg");
        assert_eq!(SatState::Deorbited.to_string(), "DEORBITED");
    }

    #[test]
    fn test_band_parse() {
        assert_eq!("mi350".parse::<AltitudeBand>(), Ok(AltitudeBand::MI350));
        assert_eq!("208 mi".parse::<AltitudeBand>(), Ok(AltitudeBand::MI208));
        assert_eq!("I70".parse::<InclinationBand>(), Ok(InclinationBand::I70));
        assert_eq!("53 deg".parse::<InclinationBand>(), Ok(InclinationBand::I53));
        assert_eq!("Deorbited".parse::<SatState>(), Ok(SatState::Deorbited));

        let err = "I99".parse::<InclinationBand>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown inclination band: I99");
    }

    #[test]
    fn test_state_serde_format() {
        let sat = Satellite::new(10001, AltitudeBand::MI208, InclinationBand::I48)
            .with_state(SatState::Deorbited);
        let json = serde_json::to_string(&sat).unwrap();
        assert!(json.contains("\"DEORBITED\""));

        let back: Satellite =
            serde_json::from_str(r#"{"id":10002,"alt":"MI215","inclin":"I53"}"#).unwrap();
        assert_eq!(back.id(), 10002);
        assert_eq!(back.state, SatState::Active);
    }
}
