#![allow(dead_code)]

pub mod fake_gateway;
pub mod mock_google;

use std::time::Duration;

use platecraft_core::{GalleryState, GalleryStore};

/// Wait until the store satisfies `predicate`, failing the test after 5s
pub async fn wait_for_state(store: &GalleryStore, predicate: impl FnMut(&GalleryState) -> bool) -> GalleryState {
    let mut rx = store.subscribe();
    let state = tokio::time::timeout(Duration::from_secs(5), rx.wait_for(predicate))
        .await
        .expect("timed out waiting for gallery state")
        .expect("gallery store dropped");
    state.clone()
}
