use chrono::Weekday;
use serde::{Deserialize, Serialize};

use super::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Attendance {
    Attending,
    #[default]
    Absent,
}

impl std::fmt::Display for Attendance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Attendance::Attending => write!(f, "attending"),
            Attendance::Absent => write!(f, "absent"),
        }
    }
}

/// One weekday of a request or confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftDay {
    #[serde(default)]
    pub status: Attendance,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl ShiftDay {
    pub fn attending(location: impl Into<String>) -> Self {
        ShiftDay {
            status: Attendance::Attending,
            location: Some(location.into()),
        }
    }

    pub fn absent() -> Self {
        ShiftDay::default()
    }

    pub fn is_attending(&self) -> bool {
        self.status == Attendance::Attending
    }
}

/// A full Monday..Sunday schedule. Missing days deserialize as absent.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekShifts {
    #[serde(default)]
    pub monday: ShiftDay,
    #[serde(default)]
    pub tuesday: ShiftDay,
    #[serde(default)]
    pub wednesday: ShiftDay,
    #[serde(default)]
    pub thursday: ShiftDay,
    #[serde(default)]
    pub friday: ShiftDay,
    #[serde(default)]
    pub saturday: ShiftDay,
    #[serde(default)]
    pub sunday: ShiftDay,
}

impl WeekShifts {
    pub fn day(&self, weekday: Weekday) -> &ShiftDay {
        match weekday {
            Weekday::Mon => &self.monday,
            Weekday::Tue => &self.tuesday,
            Weekday::Wed => &self.wednesday,
            Weekday::Thu => &self.thursday,
            Weekday::Fri => &self.friday,
            Weekday::Sat => &self.saturday,
            Weekday::Sun => &self.sunday,
        }
    }

    pub fn day_mut(&mut self, weekday: Weekday) -> &mut ShiftDay {
        match weekday {
            Weekday::Mon => &mut self.monday,
            Weekday::Tue => &mut self.tuesday,
            Weekday::Wed => &mut self.wednesday,
            Weekday::Thu => &mut self.thursday,
            Weekday::Fri => &mut self.friday,
            Weekday::Sat => &mut self.saturday,
            Weekday::Sun => &mut self.sunday,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Weekday, &ShiftDay)> {
        WEEK.into_iter().map(move |weekday| (weekday, self.day(weekday)))
    }

    pub fn attending_days(&self) -> usize {
        self.iter().filter(|(_, day)| day.is_attending()).count()
    }

    /// Drops locations from absent days and rejects attending days whose
    /// location is not one of `known_locations`. An attending day with no
    /// location is allowed; the rate directory default applies.
    pub fn normalize(mut self, known_locations: &[String]) -> Result<Self, DomainError> {
        for weekday in WEEK {
            let day = self.day_mut(weekday);
            if !day.is_attending() {
                day.location = None;
                continue;
            }
            if let Some(location) = day.location.as_deref() {
                if !known_locations.iter().any(|known| known == location) {
                    return Err(DomainError::UnknownLocation(location.to_string()));
                }
            }
        }
        Ok(self)
    }
}

const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn locations() -> Vec<String> {
        vec!["main_office".to_string(), "warehouse".to_string()]
    }

    #[test]
    fn missing_days_default_to_absent() {
        let shifts: WeekShifts = serde_json::from_value(json!({
            "monday": { "status": "attending", "location": "warehouse" }
        }))
        .unwrap();

        assert_eq!(shifts.monday, ShiftDay::attending("warehouse"));
        assert_eq!(shifts.sunday, ShiftDay::absent());
        assert_eq!(shifts.attending_days(), 1);
    }

    #[test]
    fn normalize_clears_locations_on_absent_days() {
        let mut shifts = WeekShifts::default();
        shifts.tuesday = ShiftDay {
            status: Attendance::Absent,
            location: Some("warehouse".to_string()),
        };
        shifts.friday = ShiftDay::attending("main_office");

        let normalized = shifts.normalize(&locations()).unwrap();
        assert_eq!(normalized.tuesday.location, None);
        assert_eq!(normalized.day(Weekday::Fri), &ShiftDay::attending("main_office"));
    }

    #[test]
    fn normalize_rejects_unknown_locations() {
        let mut shifts = WeekShifts::default();
        shifts.saturday = ShiftDay::attending("moon_base");

        assert_eq!(
            shifts.normalize(&locations()),
            Err(DomainError::UnknownLocation("moon_base".to_string()))
        );
    }

    #[test]
    fn iterates_monday_first() {
        let shifts = WeekShifts::default();
        let order: Vec<Weekday> = shifts.iter().map(|(weekday, _)| weekday).collect();
        assert_eq!(order.first(), Some(&Weekday::Mon));
        assert_eq!(order.last(), Some(&Weekday::Sun));
        assert_eq!(order.len(), 7);
    }
}
