pub mod gestures;
