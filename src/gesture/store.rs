use crate::gesture::types::LandmarkFrame;
use crate::store::operations::gestures::GestureTemplate;
use crate::store::{Store, StoreError};

/// The persistence operations the recognition core depends on.
///
/// The library is handed to the matcher through this trait rather than read
/// from shared global state.
pub trait TemplateStore {
    fn list(&self) -> Result<Vec<GestureTemplate>, StoreError>;

    fn create(&self, name: &str, frames: Vec<LandmarkFrame>) -> Result<GestureTemplate, StoreError>;

    fn delete_one(&self, gesture_id: &str) -> Result<bool, StoreError>;

    fn delete_all(&self) -> Result<usize, StoreError>;
}

impl TemplateStore for Store {
    fn list(&self) -> Result<Vec<GestureTemplate>, StoreError> {
        self.list_gestures()
    }

    fn create(&self, name: &str, frames: Vec<LandmarkFrame>) -> Result<GestureTemplate, StoreError> {
        self.create_gesture(name, frames)
    }

    fn delete_one(&self, gesture_id: &str) -> Result<bool, StoreError> {
        self.delete_gesture(gesture_id)
    }

    fn delete_all(&self) -> Result<usize, StoreError> {
        self.delete_all_gestures()
    }
}
