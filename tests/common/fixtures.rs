use lingo_sprint::store::operations::catalog::{Lesson, Level, Sentence};
use lingo_sprint::store::Store;

/// Seeds a small catalog used by the HTTP test suites:
///
/// - level 1 "A0"
///   - lesson 10 "Greetings", sentences 101..=103
///   - lesson 11 "Numbers", 20 sentences 200..=219 (exercises the
///     two-star error-ratio boundary)
///   - lesson 12 "Empty", no sentences
pub fn seed_catalog(store: &Store) {
    store
        .put_level(&Level {
            id: 1,
            title: "A0".to_string(),
        })
        .expect("seed level");

    store
        .put_lesson(&Lesson {
            id: 10,
            level_id: 1,
            lesson_number: 1,
            title: "Greetings".to_string(),
        })
        .expect("seed lesson 10");
    for (idx, id) in (101..=103).enumerate() {
        store
            .put_sentence(&Sentence {
                id,
                lesson_id: 10,
                order_number: idx as i32 + 1,
                prompt: format!("prompt {id}"),
                answer: format!("answer {id}"),
                transcription: Some(format!("[transcription {id}]")),
                audio_path: None,
            })
            .expect("seed sentence");
    }

    store
        .put_lesson(&Lesson {
            id: 11,
            level_id: 1,
            lesson_number: 2,
            title: "Numbers".to_string(),
        })
        .expect("seed lesson 11");
    for (idx, id) in (200..220).enumerate() {
        store
            .put_sentence(&Sentence {
                id,
                lesson_id: 11,
                order_number: idx as i32 + 1,
                prompt: format!("prompt {id}"),
                answer: format!("answer {id}"),
                transcription: None,
                audio_path: None,
            })
            .expect("seed sentence");
    }

    store
        .put_lesson(&Lesson {
            id: 12,
            level_id: 1,
            lesson_number: 3,
            title: "Empty".to_string(),
        })
        .expect("seed lesson 12");
}
