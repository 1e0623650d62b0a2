use crate::utils::error::FlyffError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// A single entity identifier as the API accepts it in a path segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Id {
    Int(i64),
    Text(String),
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Id::Int(n) => write!(f, "{}", n),
            Id::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Id {
    fn from(value: i64) -> Self {
        Id::Int(value)
    }
}

impl From<i32> for Id {
    fn from(value: i32) -> Self {
        Id::Int(value.into())
    }
}

impl From<u32> for Id {
    fn from(value: u32) -> Self {
        Id::Int(value.into())
    }
}

impl From<&str> for Id {
    fn from(value: &str) -> Self {
        Id::Text(value.to_string())
    }
}

impl From<String> for Id {
    fn from(value: String) -> Self {
        Id::Text(value)
    }
}

impl Id {
    /// Reads a JSON number or string as an ID; anything else yields `None`.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => match n.as_i64() {
                Some(n) => Some(Id::Int(n)),
                None => Some(Id::Text(n.to_string())),
            },
            Value::String(s) => Some(Id::Text(s.clone())),
            _ => None,
        }
    }
}

/// What a caller may pass where a list of IDs is expected.
///
/// Strings are treated as delimited lists: both commas and spaces separate IDs.
/// Order is always preserved, since bulk endpoints answer in request order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdSpec {
    Single(Id),
    List(Vec<Id>),
    Delimited(String),
}

impl IdSpec {
    /// Builds a list from the JSON array of IDs that `resource`'s bare endpoint returns.
    pub fn from_json(resource: Resource, value: &Value) -> crate::utils::error::Result<Self> {
        let parse = |item: &Value| {
            Id::from_json(item).ok_or_else(|| FlyffError::InvalidId {
                resource: resource.path().to_string(),
                value: item.to_string(),
            })
        };
        match value {
            Value::Array(items) => Ok(IdSpec::List(
                items.iter().map(parse).collect::<crate::utils::error::Result<Vec<_>>>()?,
            )),
            other => Ok(IdSpec::Single(parse(other)?)),
        }
    }
}

impl From<Id> for IdSpec {
    fn from(value: Id) -> Self {
        IdSpec::Single(value)
    }
}

impl From<i64> for IdSpec {
    fn from(value: i64) -> Self {
        IdSpec::Single(Id::Int(value))
    }
}

impl From<i32> for IdSpec {
    fn from(value: i32) -> Self {
        IdSpec::Single(value.into())
    }
}

impl From<u32> for IdSpec {
    fn from(value: u32) -> Self {
        IdSpec::Single(value.into())
    }
}

impl From<&str> for IdSpec {
    fn from(value: &str) -> Self {
        IdSpec::Delimited(value.to_string())
    }
}

impl From<String> for IdSpec {
    fn from(value: String) -> Self {
        IdSpec::Delimited(value)
    }
}

impl<T: Into<Id>> From<Vec<T>> for IdSpec {
    fn from(values: Vec<T>) -> Self {
        IdSpec::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Id> + Clone> From<&[T]> for IdSpec {
    fn from(values: &[T]) -> Self {
        IdSpec::List(values.iter().cloned().map(Into::into).collect())
    }
}

impl<T: Into<Id>, const N: usize> From<[T; N]> for IdSpec {
    fn from(values: [T; N]) -> Self {
        IdSpec::List(values.into_iter().map(Into::into).collect())
    }
}

/// Field used to order entries when a resource is dumped to disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Id,
    Level,
}

impl SortKey {
    pub fn field(&self) -> &'static str {
        match self {
            SortKey::Id => "id",
            SortKey::Level => "level",
        }
    }
}

impl FromStr for SortKey {
    type Err = FlyffError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "id" => Ok(SortKey::Id),
            "level" | "lvl" => Ok(SortKey::Level),
            other => Err(FlyffError::InvalidConfigValueError {
                field: "sort_by".to_string(),
                value: other.to_string(),
                reason: "Valid sort keys: id, level".to_string(),
            }),
        }
    }
}

/// Entity categories exposed by the API, keyed by their URL path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    Item,
    Class,
    World,
    Monster,
    EquipSet,
    Skill,
    Npc,
    PartySkill,
    Quest,
    Achievement,
    UpgradeLevelBonus,
    SkillAwake,
    RaisedPet,
    Dungeon,
    Pk,
}

impl Resource {
    pub const ALL: [Resource; 15] = [
        Resource::Item,
        Resource::Class,
        Resource::World,
        Resource::Monster,
        Resource::EquipSet,
        Resource::Skill,
        Resource::Npc,
        Resource::PartySkill,
        Resource::Quest,
        Resource::Achievement,
        Resource::UpgradeLevelBonus,
        Resource::SkillAwake,
        Resource::RaisedPet,
        Resource::Dungeon,
        Resource::Pk,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Resource::Item => "item",
            Resource::Class => "class",
            Resource::World => "world",
            Resource::Monster => "monster",
            Resource::EquipSet => "equipset",
            Resource::Skill => "skill",
            Resource::Npc => "npc",
            Resource::PartySkill => "partyskill",
            Resource::Quest => "quest",
            Resource::Achievement => "achievement",
            Resource::UpgradeLevelBonus => "upgradelevelbonus",
            Resource::SkillAwake => "skillawake",
            Resource::RaisedPet => "raisedpet",
            Resource::Dungeon => "dungeon",
            Resource::Pk => "pk",
        }
    }

    /// Collections list their IDs on the bare path and serve entities under `/<ids>`.
    /// The rest only answer on the bare path.
    pub fn is_collection(&self) -> bool {
        !matches!(
            self,
            Resource::UpgradeLevelBonus
                | Resource::SkillAwake
                | Resource::RaisedPet
                | Resource::Dungeon
                | Resource::Pk
        )
    }

    pub fn default_sort_key(&self) -> Option<SortKey> {
        match self {
            Resource::Item | Resource::Monster | Resource::Skill | Resource::Quest => {
                Some(SortKey::Level)
            }
            Resource::Class
            | Resource::World
            | Resource::EquipSet
            | Resource::Npc
            | Resource::PartySkill
            | Resource::Achievement => Some(SortKey::Id),
            _ => None,
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for Resource {
    type Err = FlyffError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        let resource = match name.as_str() {
            "item" | "items" => Resource::Item,
            "class" | "classes" => Resource::Class,
            "world" | "worlds" => Resource::World,
            "monster" | "monsters" => Resource::Monster,
            "equipset" | "equipsets" | "equipment" => Resource::EquipSet,
            "skill" | "skills" => Resource::Skill,
            "npc" | "npcs" => Resource::Npc,
            "partyskill" | "partyskills" => Resource::PartySkill,
            "quest" | "quests" => Resource::Quest,
            "achievement" | "achievements" => Resource::Achievement,
            "upgradelevelbonus" | "upgradebonus" => Resource::UpgradeLevelBonus,
            "skillawake" | "skillawakes" => Resource::SkillAwake,
            "raisedpet" | "raisedpets" | "pets" => Resource::RaisedPet,
            "dungeon" | "dungeons" => Resource::Dungeon,
            "pk" => Resource::Pk,
            _ => return Err(FlyffError::UnknownResource { name }),
        };
        Ok(resource)
    }
}
