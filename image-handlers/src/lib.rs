//! Image bot front-end: turns prompts into generated pictures.

mod image_generation_handler;

pub use image_generation_handler::{
    ImageGenerationHandler, MSG_GENERATING, MSG_GENERATION_FAILED, MSG_INVALID_PROMPT,
    MSG_SEND_FAILED, MSG_TIMEOUT,
};
