pub mod environment;
pub mod paths;
pub mod terminal;

pub use environment::{get_claude_dir, home_dir, xdg_config_home};
pub use paths::{
    DEFAULT_MAX_FILE_SIZE_BYTES, decode_project_dir_name, format_path_with_tilde, safe_open_file,
    validate_file_size, validate_path_not_symlink,
};
pub use terminal::sanitize;
