use std::{
    collections::{BTreeMap, BTreeSet},
    slice::Iter,
};

use chrono::Duration;
use derive_more::Deref;
use uuid::Uuid;

use crate::{
    CreateError, DeleteError, ExerciseID, Name, Property, ReadError, Reps, Sets, SupersetID, Time,
    UpdateError, Weight,
};

#[allow(async_fn_in_trait)]
pub trait RoutineRepository {
    async fn read_routines(&self) -> Result<Vec<Routine>, ReadError>;
    async fn create_routine(
        &self,
        name: Name,
        description: String,
        category: Category,
        entries: Vec<RoutineEntryRecord>,
    ) -> Result<Routine, CreateError>;
    async fn modify_routine(
        &self,
        id: RoutineID,
        name: Option<Name>,
        description: Option<String>,
        category: Option<Category>,
        entries: Option<Vec<RoutineEntryRecord>>,
    ) -> Result<Routine, UpdateError>;
    async fn delete_routine(&self, id: RoutineID) -> Result<RoutineID, DeleteError>;
}

#[allow(async_fn_in_trait)]
pub trait RoutineService {
    async fn get_routines(&self) -> Result<Vec<Routine>, ReadError>;
    async fn create_routine(
        &self,
        name: Name,
        description: String,
        category: Category,
        entries: Vec<RoutineEntryRecord>,
    ) -> Result<Routine, CreateError>;
    async fn modify_routine(
        &self,
        id: RoutineID,
        name: Option<Name>,
        description: Option<String>,
        category: Option<Category>,
        entries: Option<Vec<RoutineEntryRecord>>,
    ) -> Result<Routine, UpdateError>;
    async fn delete_routine(&self, id: RoutineID) -> Result<RoutineID, DeleteError>;
}

/// A named, reusable template of exercises, authored once and performed
/// many times.
#[derive(Debug, Clone, PartialEq)]
pub struct Routine {
    pub id: RoutineID,
    pub name: Name,
    pub description: String,
    pub category: Category,
    pub entries: Vec<RoutineEntryRecord>,
}

impl Routine {
    pub fn num_sets(&self) -> u32 {
        self.entries.iter().map(|e| u32::from(e.target_sets)).sum()
    }

    pub fn exercises(&self) -> BTreeSet<ExerciseID> {
        self.entries
            .iter()
            .map(|e| e.exercise_id)
            .collect::<BTreeSet<_>>()
    }

    /// Rough estimate assuming 4 s per rep plus the rest target after
    /// every set.
    pub fn duration(&self) -> Duration {
        self.entries
            .iter()
            .map(|e| {
                Duration::seconds(
                    i64::from(u32::from(e.target_sets))
                        * (i64::from(u32::from(e.target_reps)) * 4 + i64::from(e.rest)),
                )
            })
            .sum()
    }

    /// Positions of grouped entries, partitioned by superset.
    #[must_use]
    pub fn supersets(&self) -> BTreeMap<SupersetID, Vec<u32>> {
        let mut result: BTreeMap<SupersetID, Vec<u32>> = BTreeMap::new();
        for entry in &self.entries {
            if let Some(superset_id) = entry.superset_id {
                result.entry(superset_id).or_default().push(entry.position);
            }
        }
        result
    }
}

#[derive(Deref, Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RoutineID(Uuid);

impl RoutineID {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for RoutineID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for RoutineID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

/// One persisted exercise placement within a routine. The position is
/// written explicitly here, unlike in the editor where it is implicit in
/// the entry order.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutineEntryRecord {
    pub exercise_id: ExerciseID,
    pub position: u32,
    pub target_sets: Sets,
    pub target_reps: Reps,
    pub target_weight: Weight,
    pub rest: Time,
    pub notes: String,
    pub superset_id: Option<SupersetID>,
}

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Category {
    Push,
    Pull,
    Legs,
    FullBody,
    Split,
    Cardio,
    #[default]
    Other,
}

impl Property for Category {
    fn iter() -> Iter<'static, Category> {
        static CATEGORIES: [Category; 7] = [
            Category::Push,
            Category::Pull,
            Category::Legs,
            Category::FullBody,
            Category::Split,
            Category::Cardio,
            Category::Other,
        ];
        CATEGORIES.iter()
    }

    fn name(self) -> &'static str {
        match self {
            Category::Push => "Push",
            Category::Pull => "Pull",
            Category::Legs => "Legs",
            Category::FullBody => "Full Body",
            Category::Split => "Split",
            Category::Cardio => "Cardio",
            Category::Other => "Other",
        }
    }
}

impl Category {
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Category::Push => "push",
            Category::Pull => "pull",
            Category::Legs => "legs",
            Category::FullBody => "fullbody",
            Category::Split => "split",
            Category::Cardio => "cardio",
            Category::Other => "other",
        }
    }
}

impl TryFrom<&str> for Category {
    type Error = CategoryError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "push" => Ok(Category::Push),
            "pull" => Ok(Category::Pull),
            "legs" => Ok(Category::Legs),
            "fullbody" => Ok(Category::FullBody),
            "split" => Ok(Category::Split),
            "cardio" => Ok(Category::Cardio),
            "other" => Ok(Category::Other),
            _ => Err(CategoryError::Invalid),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum CategoryError {
    #[error("Invalid routine category")]
    Invalid,
}
