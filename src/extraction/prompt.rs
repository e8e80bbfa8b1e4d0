use super::request::ExtractionRequest;
use crate::providers::Prompt;

/// Output rules shared by every extraction mode.
///
/// Kept in `rules.txt` and embedded at compile time so the wording can be
/// edited without touching Rust string syntax.
pub const INGREDIENT_RULES: &str = include_str!("rules.txt");

const IMAGE_INSTRUCTION: &str = "Analyze this image and extract all the ingredients mentioned. This could be a recipe, ingredient list, or cooking instructions.";

/// Lead sentence for a request, before the shared rules
pub fn instruction_for(request: &ExtractionRequest) -> String {
    match request {
        ExtractionRequest::Dish { query } => {
            format!("List the main ingredients needed to make \"{}\".", query)
        }
        ExtractionRequest::Text { body } => {
            format!("Extract all the ingredients from this recipe text: \"{}\"", body)
        }
        ExtractionRequest::Image(_) => IMAGE_INSTRUCTION.to_string(),
    }
}

/// Build the full prompt, encoding the image if there is one.
///
/// Takes the request by value: image bytes are dropped once encoded.
pub fn build_prompt(request: ExtractionRequest) -> Prompt {
    let text = format!("{}\n\n{}", instruction_for(&request), INGREDIENT_RULES);
    match request {
        ExtractionRequest::Image(image) => Prompt::with_image(text, image.encode()),
        _ => Prompt::text(text),
    }
}
