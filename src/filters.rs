//! Partner search filter applied to profiles fetched from the backend.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::location::PlaceIndex;
use crate::skills::{Discipline, LevelRange};

/// Tags users attach to their profile to say what they are looking for.
pub const INTENT_TAGS: &[&str] = &[
    "Tourenpartner:in gesucht",
    "Trainingspartner:in gesucht",
    "Flexibel für spontane Touren",
    "Unter der Woche verfügbar",
    "Nur am Wochenende verfügbar",
    "Neu in der Region",
];

/// The profile fields the filter looks at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub intent_tags: Vec<String>,
}

/// A skill a user has listed, with their grade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSkill {
    pub user_id: String,
    pub skill: String,
    pub experience_level: String,
}

/// Criteria for the partner list. Unset fields do not filter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileFilter {
    pub age_min: Option<u32>,
    pub age_max: Option<u32>,
    pub gender: Option<String>,
    /// Centre of the radius search; only used together with `radius_km`.
    pub location: Option<String>,
    pub radius_km: Option<f64>,
    pub skill: Option<Discipline>,
    pub level_range: LevelRange,
    pub intent_tags: Vec<String>,
}

impl ProfileFilter {
    /// Whether any criterion is set.
    pub fn is_active(&self) -> bool {
        self.age_min.is_some()
            || self.age_max.is_some()
            || self.gender.is_some()
            || self.location.is_some()
            || self.radius_km.is_some()
            || self.skill.is_some()
            || !self.level_range.is_full()
            || !self.intent_tags.is_empty()
    }

    /// Keep the profiles matching every criterion, in input order.
    ///
    /// `skills` maps a profile id to the skills that user listed.
    pub fn apply<'a>(
        &self,
        places: &PlaceIndex,
        profiles: &'a [Profile],
        skills: &HashMap<String, Vec<UserSkill>>,
    ) -> Vec<&'a Profile> {
        profiles
            .iter()
            .filter(|p| self.matches_age(p))
            .filter(|p| self.matches_gender(p))
            .filter(|p| self.matches_tags(p))
            .filter(|p| self.matches_radius(places, p))
            .filter(|p| self.matches_skill(skills.get(&p.id).map(Vec::as_slice).unwrap_or(&[])))
            .collect()
    }

    fn matches_age(&self, profile: &Profile) -> bool {
        if self.age_min.is_none() && self.age_max.is_none() {
            return true;
        }
        let Some(age) = profile.age else {
            return false;
        };
        self.age_min.map_or(true, |min| age >= min) && self.age_max.map_or(true, |max| age <= max)
    }

    fn matches_gender(&self, profile: &Profile) -> bool {
        match &self.gender {
            Some(g) => profile.gender.as_deref() == Some(g.as_str()),
            None => true,
        }
    }

    fn matches_tags(&self, profile: &Profile) -> bool {
        self.intent_tags.iter().all(|t| profile.intent_tags.contains(t))
    }

    fn matches_radius(&self, places: &PlaceIndex, profile: &Profile) -> bool {
        let (Some(centre), Some(radius)) = (&self.location, self.radius_km) else {
            return true;
        };
        match &profile.location {
            Some(loc) => places.distance_km(centre, loc) <= radius,
            None => false,
        }
    }

    fn matches_skill(&self, user_skills: &[UserSkill]) -> bool {
        let Some(discipline) = self.skill else {
            return true;
        };
        let Some(listed) = user_skills.iter().find(|s| Discipline::from_name(&s.skill) == Some(discipline)) else {
            return false;
        };
        match discipline.level_index(&listed.experience_level) {
            Some(idx) => self.level_range.contains(idx, discipline.levels().len()),
            None => false,
        }
    }
}

/// Group skill rows by user id.
pub fn skills_by_user(rows: Vec<UserSkill>) -> HashMap<String, Vec<UserSkill>> {
    let mut map: HashMap<String, Vec<UserSkill>> = HashMap::new();
    for row in rows {
        map.entry(row.user_id.clone()).or_default().push(row);
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::DEFAULT_COUNTRIES;

    fn places() -> PlaceIndex {
        let allowed: Vec<String> = DEFAULT_COUNTRIES.iter().map(|c| c.to_string()).collect();
        PlaceIndex::bundled(&allowed).unwrap()
    }

    fn profile(id: &str, age: Option<u32>, gender: Option<&str>, location: Option<&str>) -> Profile {
        Profile {
            id: id.into(),
            username: format!("user_{id}"),
            full_name: None,
            age,
            gender: gender.map(String::from),
            location: location.map(String::from),
            languages: vec!["DE".into()],
            intent_tags: vec![],
        }
    }

    fn skill(user: &str, skill: &str, level: &str) -> UserSkill {
        UserSkill {
            user_id: user.into(),
            skill: skill.into(),
            experience_level: level.into(),
        }
    }

    fn ids<'a>(profiles: &[&'a Profile]) -> Vec<&'a str> {
        profiles.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_default_filter_keeps_everything() {
        let filter = ProfileFilter::default();
        assert!(!filter.is_active());
        let profiles = vec![profile("a", None, None, None), profile("b", Some(30), None, Some("Bern"))];
        let kept = filter.apply(&places(), &profiles, &HashMap::new());
        assert_eq!(ids(&kept), ["a", "b"]);
    }

    #[test]
    fn test_age_bounds_inclusive() {
        let filter = ProfileFilter { age_min: Some(25), age_max: Some(35), ..Default::default() };
        assert!(filter.is_active());
        let profiles = vec![
            profile("young", Some(24), None, None),
            profile("min", Some(25), None, None),
            profile("max", Some(35), None, None),
            profile("old", Some(36), None, None),
            profile("unknown", None, None, None),
        ];
        let kept = filter.apply(&places(), &profiles, &HashMap::new());
        assert_eq!(ids(&kept), ["min", "max"]);
    }

    #[test]
    fn test_gender_and_tags() {
        let mut tagged = profile("tagged", None, Some("female"), None);
        tagged.intent_tags = vec![INTENT_TAGS[0].into(), INTENT_TAGS[5].into()];
        let mut partial = profile("partial", None, Some("female"), None);
        partial.intent_tags = vec![INTENT_TAGS[0].into()];
        let other = profile("other", None, Some("male"), None);
        let profiles = vec![tagged, partial, other];

        let filter = ProfileFilter { gender: Some("female".into()), ..Default::default() };
        assert_eq!(ids(&filter.apply(&places(), &profiles, &HashMap::new())), ["tagged", "partial"]);

        let filter = ProfileFilter {
            intent_tags: vec![INTENT_TAGS[0].into(), INTENT_TAGS[5].into()],
            ..Default::default()
        };
        assert_eq!(ids(&filter.apply(&places(), &profiles, &HashMap::new())), ["tagged"]);
    }

    #[test]
    fn test_radius() {
        let filter = ProfileFilter {
            location: Some("Munich".into()),
            radius_km: Some(100.0),
            ..Default::default()
        };
        let profiles = vec![
            profile("near", None, None, Some("Rosenheim")),
            profile("far", None, None, Some("Berlin")),
            profile("abroad", None, None, Some("Paris")),
            profile("nowhere", None, None, None),
            profile("home", None, None, Some("munich")),
        ];
        let kept = filter.apply(&places(), &profiles, &HashMap::new());
        assert_eq!(ids(&kept), ["near", "home"]);
    }

    #[test]
    fn test_location_without_radius_does_not_filter() {
        let filter = ProfileFilter { location: Some("Munich".into()), ..Default::default() };
        let profiles = vec![profile("a", None, None, None), profile("b", None, None, Some("Berlin"))];
        assert_eq!(filter.apply(&places(), &profiles, &HashMap::new()).len(), 2);
    }

    #[test]
    fn test_unknown_centre_excludes_all_located_profiles() {
        let filter = ProfileFilter {
            location: Some("Atlantis".into()),
            radius_km: Some(10_000.0),
            ..Default::default()
        };
        let profiles = vec![profile("a", None, None, Some("Berlin"))];
        assert!(filter.apply(&places(), &profiles, &HashMap::new()).is_empty());
    }

    #[test]
    fn test_skill_level_range() {
        let profiles = vec![
            profile("beginner", None, None, None),
            profile("expert", None, None, None),
            profile("boulderer", None, None, None),
            profile("odd", None, None, None),
        ];
        let skills = skills_by_user(vec![
            skill("beginner", "Mountaineering", "PD"),
            skill("expert", "Mountaineering", "TD"),
            skill("expert", "Bouldering", "7A"),
            skill("boulderer", "Bouldering", "6B"),
            skill("odd", "Mountaineering", "5.10a"),
        ]);

        let filter = ProfileFilter { skill: Some(Discipline::Mountaineering), ..Default::default() };
        assert_eq!(ids(&filter.apply(&places(), &profiles, &skills)), ["beginner", "expert"]);

        // 6 grades: 50% -> index 2 (AD), 100% -> index 5 (ED)
        let filter = ProfileFilter {
            skill: Some(Discipline::Mountaineering),
            level_range: LevelRange::new(50, 100),
            ..Default::default()
        };
        assert!(filter.is_active());
        assert_eq!(ids(&filter.apply(&places(), &profiles, &skills)), ["expert"]);
    }

    #[test]
    fn test_filter_deserialises_with_defaults() {
        let filter: ProfileFilter =
            serde_json::from_str(r#"{ "skill": "Bouldering", "radius_km": 50 }"#).unwrap();
        assert_eq!(filter.skill, Some(Discipline::Bouldering));
        assert_eq!(filter.radius_km, Some(50.0));
        assert!(filter.level_range.is_full());
        assert!(filter.intent_tags.is_empty());
    }

    #[test]
    fn test_skills_by_user() {
        let map = skills_by_user(vec![
            skill("a", "Bouldering", "6A"),
            skill("b", "Drytooling", "M5"),
            skill("a", "Ice climbing", "WI3"),
        ]);
        assert_eq!(map.len(), 2);
        assert_eq!(map["a"].len(), 2);
    }
}
