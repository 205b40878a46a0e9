use log::{debug, error};

use crate::{
    Category, CreateError, DeleteError, Equipment, Exercise, ExerciseID, ExerciseRepository,
    ExerciseService, MuscleGroup, Name, ReadError, Role, Routine, RoutineEntryRecord, RoutineID,
    RoutineRepository, RoutineService, UpdateError, User, UserID, UserRepository, UserService,
    Workout, WorkoutID, WorkoutRepository, WorkoutService,
};

/// Entry point of the domain layer: dispatches to a repository and logs
/// failed calls.
pub struct Service<R> {
    repository: R,
}

impl<R> Service<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

macro_rules! log_on_error {
    ($func: expr, $error: ident, $action: literal, $entity: literal) => {{
        let result = $func.await;
        match result {
            Ok(_) => {}
            Err(ref err) => match err {
                $error::Storage(crate::StorageError::NoConnection) => {
                    debug!("failed to {} {}: {err}", $action, $entity);
                }
                _ => {
                    error!("failed to {} {}: {err}", $action, $entity);
                }
            },
        }
        result
    }};
}

impl<R: UserRepository> UserService for Service<R> {
    async fn get_users(&self) -> Result<Vec<User>, ReadError> {
        log_on_error!(self.repository.read_users(), ReadError, "get", "users")
    }

    async fn create_user(&self, name: Name, role: Role) -> Result<User, CreateError> {
        log_on_error!(
            self.repository.create_user(name, role),
            CreateError,
            "create",
            "user"
        )
    }

    async fn replace_user(&self, user: User) -> Result<User, UpdateError> {
        log_on_error!(
            self.repository.replace_user(user),
            UpdateError,
            "replace",
            "user"
        )
    }

    async fn delete_user(&self, id: UserID) -> Result<UserID, DeleteError> {
        log_on_error!(
            self.repository.delete_user(id),
            DeleteError,
            "delete",
            "user"
        )
    }
}

impl<R: ExerciseRepository> ExerciseService for Service<R> {
    async fn get_exercises(&self) -> Result<Vec<Exercise>, ReadError> {
        log_on_error!(
            self.repository.read_exercises(),
            ReadError,
            "get",
            "exercises"
        )
    }

    async fn create_exercise(
        &self,
        name: Name,
        muscle_group: Option<MuscleGroup>,
        equipment: Option<Equipment>,
        description: String,
    ) -> Result<Exercise, CreateError> {
        log_on_error!(
            self.repository
                .create_exercise(name, muscle_group, equipment, description),
            CreateError,
            "create",
            "exercise"
        )
    }

    async fn replace_exercise(&self, exercise: Exercise) -> Result<Exercise, UpdateError> {
        log_on_error!(
            self.repository.replace_exercise(exercise),
            UpdateError,
            "replace",
            "exercise"
        )
    }

    async fn delete_exercise(&self, id: ExerciseID) -> Result<ExerciseID, DeleteError> {
        log_on_error!(
            self.repository.delete_exercise(id),
            DeleteError,
            "delete",
            "exercise"
        )
    }
}

impl<R: RoutineRepository> RoutineService for Service<R> {
    async fn get_routines(&self) -> Result<Vec<Routine>, ReadError> {
        log_on_error!(
            self.repository.read_routines(),
            ReadError,
            "get",
            "routines"
        )
    }

    async fn create_routine(
        &self,
        name: Name,
        description: String,
        category: Category,
        entries: Vec<RoutineEntryRecord>,
    ) -> Result<Routine, CreateError> {
        log_on_error!(
            self.repository
                .create_routine(name, description, category, entries),
            CreateError,
            "create",
            "routine"
        )
    }

    async fn modify_routine(
        &self,
        id: RoutineID,
        name: Option<Name>,
        description: Option<String>,
        category: Option<Category>,
        entries: Option<Vec<RoutineEntryRecord>>,
    ) -> Result<Routine, UpdateError> {
        log_on_error!(
            self.repository
                .modify_routine(id, name, description, category, entries),
            UpdateError,
            "modify",
            "routine"
        )
    }

    async fn delete_routine(&self, id: RoutineID) -> Result<RoutineID, DeleteError> {
        log_on_error!(
            self.repository.delete_routine(id),
            DeleteError,
            "delete",
            "routine"
        )
    }
}

impl<R: WorkoutRepository> WorkoutService for Service<R> {
    async fn get_workouts(&self) -> Result<Vec<Workout>, ReadError> {
        log_on_error!(
            self.repository.read_workouts(),
            ReadError,
            "get",
            "workouts"
        )
    }

    async fn create_workout(&self, workout: Workout) -> Result<Workout, CreateError> {
        log_on_error!(
            self.repository.create_workout(workout),
            CreateError,
            "create",
            "workout"
        )
    }

    async fn delete_workout(&self, id: WorkoutID) -> Result<WorkoutID, DeleteError> {
        log_on_error!(
            self.repository.delete_workout(id),
            DeleteError,
            "delete",
            "workout"
        )
    }
}
