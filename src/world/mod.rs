mod loader;
mod model;
mod validator;

pub use loader::{load_world_from_file, load_world_from_str};

pub use model::{
    Color, DialogueData, Direction, DisplayNames, Gender, LineSet, NpcAppearance, NpcData,
    RoleLines, World,
};
pub use validator::{ValidationError, dialogue_warnings, validate_world};
