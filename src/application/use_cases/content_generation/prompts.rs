use super::validation::ValidatedRequest;
use crate::domain::content::ContentType;
use crate::domain::llm_config::ChatMessage;

pub(crate) const SYSTEM_PROMPT: &str = "You are an expert social media copywriter for aesthetic and medical-spa clinics. Write accurate, compliant, engaging posts. Never promise guaranteed results and never give individual medical advice. After the post body, add a blank line, then a line reading exactly \"Hashtags:\", then 5 to 7 relevant hashtags separated by spaces, each starting with #.";

pub(crate) fn content_type_instructions(content_type: ContentType) -> &'static str {
    match content_type {
        ContentType::Educational => "Write an educational post that explains the topic clearly, corrects a common misconception, and leaves the reader with one practical takeaway.",
        ContentType::BeforeAfter => "Write a before-and-after showcase caption. Describe the patient journey and visible improvement in general terms, note that results vary between individuals, and avoid exaggerated claims.",
        ContentType::Promotional => "Write a promotional post announcing an offer or service. Lead with the benefit, keep it concise, and close with a clear call to action to book a consultation.",
        ContentType::Procedure => "Write a post that walks through the procedure step by step: what happens during the appointment, how long it takes, and what recovery looks like.",
        ContentType::Tips => "Write a tips post with 3 to 5 short, numbered, actionable tips related to the topic.",
    }
}

pub(crate) fn build_user_prompt(request: &ValidatedRequest) -> String {
    let mut body = String::new();
    body.push_str(content_type_instructions(request.content_type));
    body.push_str("\n\n");
    body.push_str(&format!("Topic: {}\n", request.topic));
    body.push_str(&format!("Treatment category: {}\n", request.treatment_category));
    body.push_str(&format!("Platform: {}\n", request.platform));
    body.push_str(&format!("Tone: {}\n", request.tone));

    if let Some(context) = request.additional_context.as_ref() {
        body.push_str(&format!("Additional context: {}\n", context));
    }

    body.push_str(&format!(
        "\nFormat the post for {}, matching its usual length and style.",
        request.platform
    ));
    body
}

pub(crate) fn build_messages(request: &ValidatedRequest) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(SYSTEM_PROMPT),
        ChatMessage::user(build_user_prompt(request)),
    ]
}
