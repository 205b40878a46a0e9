use std::{cell::RefCell, collections::BTreeMap};

use ironlog_domain as domain;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::records::{ExerciseRow, ProfileRow, RecordError, RoutineRow, WorkoutLogRow};

/// Record store backed by plain maps, holding the same rows the managed
/// database would. Used as the storage backend in tests and as the
/// offline cache of the app shell; the whole store can be snapshotted to
/// and restored from JSON.
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    tables: RefCell<Tables>,
}

#[derive(Serialize, Deserialize, Debug, Default)]
struct Tables {
    profiles: BTreeMap<Uuid, ProfileRow>,
    exercises: BTreeMap<Uuid, ExerciseRow>,
    routines: BTreeMap<Uuid, RoutineRow>,
    workout_logs: BTreeMap<Uuid, WorkoutLogRow>,
}

impl InMemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn export(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&*self.tables.borrow())
    }

    pub fn import(json: &str) -> serde_json::Result<Self> {
        Ok(Self {
            tables: RefCell::new(serde_json::from_str(json)?),
        })
    }

    fn exercise_names(&self) -> Result<BTreeMap<Uuid, domain::Name>, RecordError> {
        self.tables
            .borrow()
            .exercises
            .values()
            .map(|row| Ok((row.id, domain::Name::new(&row.name)?)))
            .collect()
    }
}

fn read_error(error: RecordError) -> domain::ReadError {
    domain::ReadError::Other(Box::new(error))
}

impl domain::UserRepository for InMemoryStorage {
    async fn read_users(&self) -> Result<Vec<domain::User>, domain::ReadError> {
        self.tables
            .borrow()
            .profiles
            .values()
            .map(domain::User::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(read_error)
    }

    async fn create_user(
        &self,
        name: domain::Name,
        role: domain::Role,
    ) -> Result<domain::User, domain::CreateError> {
        let user = domain::User {
            id: domain::UserID::new(),
            name,
            role,
        };
        self.tables
            .borrow_mut()
            .profiles
            .insert(*user.id, ProfileRow::from(&user));
        Ok(user)
    }

    async fn replace_user(&self, user: domain::User) -> Result<domain::User, domain::UpdateError> {
        let mut tables = self.tables.borrow_mut();
        if !tables.profiles.contains_key(&*user.id) {
            return Err(domain::UpdateError::Conflict);
        }
        tables.profiles.insert(*user.id, ProfileRow::from(&user));
        Ok(user)
    }

    async fn delete_user(&self, id: domain::UserID) -> Result<domain::UserID, domain::DeleteError> {
        self.tables.borrow_mut().profiles.remove(&*id);
        Ok(id)
    }
}

impl domain::ExerciseRepository for InMemoryStorage {
    async fn read_exercises(&self) -> Result<Vec<domain::Exercise>, domain::ReadError> {
        self.tables
            .borrow()
            .exercises
            .values()
            .map(domain::Exercise::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(read_error)
    }

    async fn create_exercise(
        &self,
        name: domain::Name,
        muscle_group: Option<domain::MuscleGroup>,
        equipment: Option<domain::Equipment>,
        description: String,
    ) -> Result<domain::Exercise, domain::CreateError> {
        let exercise = domain::Exercise {
            id: domain::ExerciseID::new(),
            name,
            muscle_group,
            equipment,
            description,
            custom: true,
        };
        self.tables
            .borrow_mut()
            .exercises
            .insert(*exercise.id, ExerciseRow::from(&exercise));
        Ok(exercise)
    }

    async fn replace_exercise(
        &self,
        exercise: domain::Exercise,
    ) -> Result<domain::Exercise, domain::UpdateError> {
        let mut tables = self.tables.borrow_mut();
        if !tables.exercises.contains_key(&*exercise.id) {
            return Err(domain::UpdateError::Conflict);
        }
        tables
            .exercises
            .insert(*exercise.id, ExerciseRow::from(&exercise));
        Ok(exercise)
    }

    async fn delete_exercise(
        &self,
        id: domain::ExerciseID,
    ) -> Result<domain::ExerciseID, domain::DeleteError> {
        self.tables.borrow_mut().exercises.remove(&*id);
        Ok(id)
    }
}

impl domain::RoutineRepository for InMemoryStorage {
    async fn read_routines(&self) -> Result<Vec<domain::Routine>, domain::ReadError> {
        self.tables
            .borrow()
            .routines
            .values()
            .map(domain::Routine::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(read_error)
    }

    async fn create_routine(
        &self,
        name: domain::Name,
        description: String,
        category: domain::Category,
        entries: Vec<domain::RoutineEntryRecord>,
    ) -> Result<domain::Routine, domain::CreateError> {
        let routine = domain::Routine {
            id: domain::RoutineID::new(),
            name,
            description,
            category,
            entries,
        };
        self.tables
            .borrow_mut()
            .routines
            .insert(*routine.id, RoutineRow::from(&routine));
        Ok(routine)
    }

    async fn modify_routine(
        &self,
        id: domain::RoutineID,
        name: Option<domain::Name>,
        description: Option<String>,
        category: Option<domain::Category>,
        entries: Option<Vec<domain::RoutineEntryRecord>>,
    ) -> Result<domain::Routine, domain::UpdateError> {
        let mut tables = self.tables.borrow_mut();
        let Some(row) = tables.routines.get(&*id) else {
            return Err(domain::UpdateError::Conflict);
        };
        let mut routine = domain::Routine::try_from(row)
            .map_err(|e| domain::UpdateError::Other(Box::new(e)))?;
        if let Some(name) = name {
            routine.name = name;
        }
        if let Some(description) = description {
            routine.description = description;
        }
        if let Some(category) = category {
            routine.category = category;
        }
        if let Some(entries) = entries {
            // The entry batch is replaced wholesale; there is no
            // per-entry patching.
            routine.entries = entries;
        }
        tables.routines.insert(*id, RoutineRow::from(&routine));
        Ok(routine)
    }

    async fn delete_routine(
        &self,
        id: domain::RoutineID,
    ) -> Result<domain::RoutineID, domain::DeleteError> {
        self.tables.borrow_mut().routines.remove(&*id);
        Ok(id)
    }
}

impl domain::WorkoutRepository for InMemoryStorage {
    async fn read_workouts(&self) -> Result<Vec<domain::Workout>, domain::ReadError> {
        let names = self.exercise_names().map_err(read_error)?;
        self.tables
            .borrow()
            .workout_logs
            .values()
            .map(|row| row.to_workout(&names))
            .collect::<Result<Vec<_>, _>>()
            .map_err(read_error)
    }

    async fn create_workout(
        &self,
        workout: domain::Workout,
    ) -> Result<domain::Workout, domain::CreateError> {
        self.tables
            .borrow_mut()
            .workout_logs
            .insert(*workout.id, WorkoutLogRow::from_workout(&workout));
        Ok(workout)
    }

    async fn delete_workout(
        &self,
        id: domain::WorkoutID,
    ) -> Result<domain::WorkoutID, domain::DeleteError> {
        self.tables.borrow_mut().workout_logs.remove(&*id);
        Ok(id)
    }
}
