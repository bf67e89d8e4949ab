//! In-process gateway with scripted behaviour
//!
//! Extraction returns the non-blank lines of the menu text. Generated images
//! carry the dish name as bytes; edited images carry the instruction.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use async_trait::async_trait;
use platecraft_gateway::{AiGateway, GatewayError, ImageArtifact, Result};
use tokio::sync::Semaphore;

pub struct FakeGateway {
    fail_extraction: bool,
    failing_dishes: HashSet<String>,
    gated_dishes: HashSet<String>,
    gate: Arc<Semaphore>,
    gated_menus: HashSet<String>,
    extraction_gate: Arc<Semaphore>,
    fail_edits: AtomicBool,
    extract_calls: AtomicU32,
    generate_calls: AtomicU32,
    edit_calls: AtomicU32,
    prompts: Mutex<Vec<String>>,
}

impl FakeGateway {
    pub fn new() -> Self {
        Self {
            fail_extraction: false,
            failing_dishes: HashSet::new(),
            gated_dishes: HashSet::new(),
            gate: Arc::new(Semaphore::new(0)),
            gated_menus: HashSet::new(),
            extraction_gate: Arc::new(Semaphore::new(0)),
            fail_edits: AtomicBool::new(false),
            extract_calls: AtomicU32::new(0),
            generate_calls: AtomicU32::new(0),
            edit_calls: AtomicU32::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Extraction always fails
    pub fn failing_extraction(mut self) -> Self {
        self.fail_extraction = true;
        self
    }

    /// Image generation fails for this dish
    pub fn failing_for(mut self, dish: &str) -> Self {
        self.failing_dishes.insert(dish.to_owned());
        self
    }

    /// Image generation for this dish blocks until [`FakeGateway::release`]
    pub fn gated_for(mut self, dish: &str) -> Self {
        self.gated_dishes.insert(dish.to_owned());
        self
    }

    /// Extraction of a menu containing `line` blocks until
    /// [`FakeGateway::release_extraction`]
    pub fn gated_extraction_for(mut self, line: &str) -> Self {
        self.gated_menus.insert(line.to_owned());
        self
    }

    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Let `n` gated generation calls proceed
    pub fn release(&self, n: usize) {
        self.gate.add_permits(n);
    }

    /// Let `n` gated extraction calls proceed
    pub fn release_extraction(&self, n: usize) {
        self.extraction_gate.add_permits(n);
    }

    pub fn set_edits_fail(&self, fail: bool) {
        self.fail_edits.store(fail, Ordering::SeqCst);
    }

    pub fn extract_calls(&self) -> u32 {
        self.extract_calls.load(Ordering::SeqCst)
    }

    pub fn generate_calls(&self) -> u32 {
        self.generate_calls.load(Ordering::SeqCst)
    }

    pub fn edit_calls(&self) -> u32 {
        self.edit_calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    fn dish_in<'a>(set: &'a HashSet<String>, prompt: &str) -> Option<&'a String> {
        set.iter().find(|name| prompt.contains(&format!("\"{name}\"")))
    }
}

pub fn image_for(dish: &str) -> ImageArtifact {
    ImageArtifact::new(dish.as_bytes().to_vec(), "image/png")
}

#[async_trait]
impl AiGateway for FakeGateway {
    async fn extract_dish_names(&self, menu_text: &str) -> Result<Vec<String>> {
        self.extract_calls.fetch_add(1, Ordering::SeqCst);

        if self.gated_menus.iter().any(|line| menu_text.contains(line.as_str())) {
            self.extraction_gate.acquire().await.expect("gate closed").forget();
        } else {
            tokio::task::yield_now().await;
        }

        if self.fail_extraction {
            return Err(GatewayError::MalformedResponse("dish list is not a JSON array".to_owned()));
        }

        Ok(menu_text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(ToOwned::to_owned)
            .collect())
    }

    async fn generate_image(&self, prompt: &str) -> Result<ImageArtifact> {
        self.generate_calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_owned());

        if Self::dish_in(&self.gated_dishes, prompt).is_some() {
            self.gate.acquire().await.expect("gate closed").forget();
        } else {
            tokio::task::yield_now().await;
        }

        if Self::dish_in(&self.failing_dishes, prompt).is_some() {
            return Err(GatewayError::EmptyResult("no image was generated".to_owned()));
        }

        let name = prompt
            .split('"')
            .nth(1)
            .expect("prompt quotes the dish name");
        Ok(image_for(name))
    }

    async fn edit_image(&self, image: &ImageArtifact, instruction: &str) -> Result<ImageArtifact> {
        self.edit_calls.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;

        if self.fail_edits.load(Ordering::SeqCst) {
            return Err(GatewayError::Api {
                status: 500,
                message: "internal".to_owned(),
            });
        }

        Ok(ImageArtifact::new(instruction.as_bytes().to_vec(), image.media_type.clone()))
    }

    fn name(&self) -> &str {
        "fake"
    }
}
