/// Typed access to stored profiles and semester history
use super::types::{StoreError, StoredDocument};
use super::DocumentStore;
use crate::grading::{SemesterRecord, UserProfile};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

pub const PROFILE_COLLECTION: &str = "user";
pub const SEMESTER_COLLECTION: &str = "semester_record";

/// Creates or updates the profile keyed by its user id.
pub fn save_profile(
    store: &DocumentStore,
    profile: &UserProfile,
) -> Result<StoredDocument, StoreError> {
    store.upsert(
        PROFILE_COLLECTION,
        &json!({ "user_id": profile.user_id }),
        serde_json::to_value(profile)?,
    )
}

pub fn load_profile(
    store: &DocumentStore,
    user_id: &str,
) -> Result<Option<UserProfile>, StoreError> {
    store
        .find_one(PROFILE_COLLECTION, &json!({ "user_id": user_id }))?
        .map(decode)
        .transpose()
}

/// Creates or replaces one term of a user's history, keyed by user id and term.
pub fn save_semester(
    store: &DocumentStore,
    user_id: &str,
    semester: &SemesterRecord,
) -> Result<StoredDocument, StoreError> {
    store.upsert(
        SEMESTER_COLLECTION,
        &json!({ "user_id": user_id, "term": semester.term }),
        serde_json::to_value(semester)?,
    )
}

/// Replaces a user's whole semester history, in the given order.
pub fn replace_semesters(
    store: &DocumentStore,
    user_id: &str,
    semesters: &[SemesterRecord],
) -> Result<Vec<StoredDocument>, StoreError> {
    let documents = semesters
        .iter()
        .map(serde_json::to_value)
        .collect::<Result<Vec<_>, _>>()?;
    store.replace(SEMESTER_COLLECTION, &json!({ "user_id": user_id }), documents)
}

/// Removes one term from a user's history. Returns false if it was not stored.
pub fn delete_semester(
    store: &DocumentStore,
    user_id: &str,
    term: &str,
) -> Result<bool, StoreError> {
    let removed = store.delete(
        SEMESTER_COLLECTION,
        &json!({ "user_id": user_id, "term": term }),
    )?;
    Ok(removed > 0)
}

/// Loads a user's semester history in the order terms were first saved.
pub fn load_semesters(
    store: &DocumentStore,
    user_id: &str,
) -> Result<Vec<SemesterRecord>, StoreError> {
    store
        .find_all(SEMESTER_COLLECTION, &json!({ "user_id": user_id }))?
        .into_iter()
        .map(decode)
        .collect()
}

fn decode<T: DeserializeOwned>(doc: StoredDocument) -> Result<T, StoreError> {
    Ok(serde_json::from_value(Value::Object(doc.data))?)
}
