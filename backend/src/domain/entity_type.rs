//! Public entity types and their zKillboard modifier names.

use std::fmt;
use std::str::FromStr;

/// Raised when an entity type is not one of the supported names.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid entity type: {0}")]
pub struct UnknownEntityType(pub String);

/// EVE Online entity kinds a badge can describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityType {
    /// A pilot.
    Character,
    /// A player corporation.
    Corporation,
    /// An alliance of corporations.
    Alliance,
    /// An NPC faction.
    Faction,
    /// A ship hull type.
    ShipType,
    /// A ship hull class, e.g. frigates.
    ShipGroup,
    /// A solar system.
    SolarSystem,
    /// A region of space.
    Region,
}

impl EntityType {
    /// Every supported entity type.
    pub const ALL: [Self; 8] = [
        Self::Character,
        Self::Corporation,
        Self::Alliance,
        Self::Faction,
        Self::ShipType,
        Self::ShipGroup,
        Self::SolarSystem,
        Self::Region,
    ];

    /// Name used in the public badge URL.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Character => "character",
            Self::Corporation => "corporation",
            Self::Alliance => "alliance",
            Self::Faction => "faction",
            Self::ShipType => "shipType",
            Self::ShipGroup => "shipGroup",
            Self::SolarSystem => "solarSystem",
            Self::Region => "region",
        }
    }

    /// Modifier zKillboard expects in `/api/stats/{modifier}/{id}/`.
    ///
    /// # Examples
    /// ```
    /// use eve_shields::domain::EntityType;
    ///
    /// let entity: EntityType = "shipGroup".parse()?;
    /// assert_eq!(entity.upstream_field(), "groupID");
    /// # Ok::<(), eve_shields::domain::UnknownEntityType>(())
    /// ```
    #[must_use]
    pub const fn upstream_field(self) -> &'static str {
        match self {
            Self::Character => "characterID",
            Self::Corporation => "corporationID",
            Self::Alliance => "allianceID",
            Self::Faction => "factionID",
            Self::ShipType => "shipTypeID",
            Self::ShipGroup => "groupID",
            Self::SolarSystem => "solarSystemID",
            Self::Region => "regionID",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityType {
    type Err = UnknownEntityType;

    /// Exact, case-sensitive match against the public names.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|entity| entity.as_str() == value)
            .ok_or_else(|| UnknownEntityType(value.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("character", "characterID")]
    #[case("corporation", "corporationID")]
    #[case("alliance", "allianceID")]
    #[case("faction", "factionID")]
    #[case("shipType", "shipTypeID")]
    #[case("shipGroup", "groupID")]
    #[case("solarSystem", "solarSystemID")]
    #[case("region", "regionID")]
    fn translates_public_names(#[case] public: &str, #[case] upstream: &str) {
        let entity: EntityType = public.parse().expect("known entity type");
        assert_eq!(entity.upstream_field(), upstream);
        assert_eq!(entity.to_string(), public);
    }

    #[rstest]
    #[case("xyz")]
    #[case("Alliance")]
    #[case("shiptype")]
    #[case(" alliance")]
    #[case("")]
    fn rejects_unknown_or_miscased_names(#[case] public: &str) {
        let error = public.parse::<EntityType>().expect_err("must be rejected");
        assert_eq!(error, UnknownEntityType(public.to_owned()));
        assert_eq!(error.to_string(), format!("invalid entity type: {public}"));
    }
}
