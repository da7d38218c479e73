//! Key encodings for the sled trees. Numeric ids are zero-padded so that
//! byte order matches numeric order under prefix scans.

pub fn user_key(user_id: &str) -> String {
    user_id.to_string()
}

pub fn user_email_index_key(email: &str) -> String {
    format!("email:{}", email.trim().to_lowercase())
}

pub fn level_key(level_id: i64) -> String {
    encode_id(level_id)
}

pub fn lesson_key(lesson_id: i64) -> String {
    encode_id(lesson_id)
}

pub fn sentence_key(sentence_id: i64) -> String {
    encode_id(sentence_id)
}

pub fn progress_key(user_id: &str, sentence_id: i64) -> String {
    format!("{}:{}", user_id, encode_id(sentence_id))
}

pub fn progress_prefix(user_id: &str) -> String {
    format!("{}:", user_id)
}

fn encode_id(id: i64) -> String {
    format!("{:020}", id.max(0) as u64)
}
