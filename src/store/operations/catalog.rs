use serde::{Deserialize, Serialize};

use crate::store::keys;
use crate::store::{Store, StoreError};

/// Ordered grouping of lessons ("A0", "A1", ...). Immutable reference data.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Level {
    pub id: i64,
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub id: i64,
    pub level_id: i64,
    pub lesson_number: i32,
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sentence {
    pub id: i64,
    pub lesson_id: i64,
    pub order_number: i32,
    pub prompt: String,
    pub answer: String,
    pub transcription: Option<String>,
    pub audio_path: Option<String>,
}

/// On-disk seed format: levels with nested lessons and sentences. Loaded once
/// at startup when the catalog trees are empty.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogFile {
    pub levels: Vec<CatalogLevel>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogLevel {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub lessons: Vec<CatalogLesson>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogLesson {
    pub id: i64,
    pub lesson_number: i32,
    pub title: String,
    #[serde(default)]
    pub sentences: Vec<CatalogSentence>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSentence {
    pub id: i64,
    pub order_number: i32,
    pub prompt: String,
    pub answer: String,
    #[serde(default)]
    pub transcription: Option<String>,
    #[serde(default)]
    pub audio_path: Option<String>,
}

impl Store {
    pub fn put_level(&self, level: &Level) -> Result<(), StoreError> {
        let key = keys::level_key(level.id);
        self.levels.insert(key.as_bytes(), Self::serialize(level)?)?;
        Ok(())
    }

    pub fn put_lesson(&self, lesson: &Lesson) -> Result<(), StoreError> {
        let key = keys::lesson_key(lesson.id);
        self.lessons
            .insert(key.as_bytes(), Self::serialize(lesson)?)?;
        Ok(())
    }

    pub fn put_sentence(&self, sentence: &Sentence) -> Result<(), StoreError> {
        let key = keys::sentence_key(sentence.id);
        self.sentences
            .insert(key.as_bytes(), Self::serialize(sentence)?)?;
        Ok(())
    }

    pub fn get_sentence(&self, sentence_id: i64) -> Result<Option<Sentence>, StoreError> {
        let key = keys::sentence_key(sentence_id);
        match self.sentences.get(key.as_bytes())? {
            Some(raw) => Ok(Some(Self::deserialize(&raw)?)),
            None => Ok(None),
        }
    }

    pub fn list_levels(&self) -> Result<Vec<Level>, StoreError> {
        let mut levels = Vec::new();
        for item in self.levels.iter() {
            let (_, value) = item?;
            levels.push(Self::deserialize::<Level>(&value)?);
        }
        levels.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(levels)
    }

    pub fn list_lessons(&self, level_id: i64) -> Result<Vec<Lesson>, StoreError> {
        let mut lessons = Vec::new();
        for item in self.lessons.iter() {
            let (_, value) = item?;
            let lesson: Lesson = Self::deserialize(&value)?;
            if lesson.level_id == level_id {
                lessons.push(lesson);
            }
        }
        lessons.sort_by_key(|l| l.lesson_number);
        Ok(lessons)
    }

    pub fn list_all_lessons(&self) -> Result<Vec<Lesson>, StoreError> {
        let mut lessons = Vec::new();
        for item in self.lessons.iter() {
            let (_, value) = item?;
            lessons.push(Self::deserialize::<Lesson>(&value)?);
        }
        lessons.sort_by_key(|l| (l.level_id, l.lesson_number));
        Ok(lessons)
    }

    pub fn list_sentences(&self, lesson_id: i64) -> Result<Vec<Sentence>, StoreError> {
        let mut sentences = Vec::new();
        for item in self.sentences.iter() {
            let (_, value) = item?;
            let sentence: Sentence = Self::deserialize(&value)?;
            if sentence.lesson_id == lesson_id {
                sentences.push(sentence);
            }
        }
        sentences.sort_by_key(|s| s.order_number);
        Ok(sentences)
    }

    pub fn catalog_is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Import the reference catalog. Returns the number of sentences written.
    /// Idempotent: re-importing the same file overwrites identical rows.
    pub fn import_catalog(&self, catalog: &CatalogFile) -> Result<usize, StoreError> {
        let mut imported = 0;
        for level in &catalog.levels {
            self.put_level(&Level {
                id: level.id,
                title: level.title.clone(),
            })?;
            for lesson in &level.lessons {
                self.put_lesson(&Lesson {
                    id: lesson.id,
                    level_id: level.id,
                    lesson_number: lesson.lesson_number,
                    title: lesson.title.clone(),
                })?;
                for sentence in &lesson.sentences {
                    self.put_sentence(&Sentence {
                        id: sentence.id,
                        lesson_id: lesson.id,
                        order_number: sentence.order_number,
                        prompt: sentence.prompt.clone(),
                        answer: sentence.answer.clone(),
                        transcription: sentence.transcription.clone(),
                        audio_path: sentence.audio_path.clone(),
                    })?;
                    imported += 1;
                }
            }
        }
        Ok(imported)
    }
}
