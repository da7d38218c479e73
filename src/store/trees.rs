pub const USERS: &str = "users";
pub const LEVELS: &str = "levels";
pub const LESSONS: &str = "lessons";
pub const SENTENCES: &str = "sentences";
pub const PROGRESS: &str = "progress";
