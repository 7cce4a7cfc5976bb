//! Prompt templates for content analysis.

/// Prompt asking the model for a single strict JSON analysis object.
///
/// `{content}` is replaced with the extracted text.
pub const ANALYSIS_PROMPT: &str = r#"You are an AI content classifier and social media strategist.

Step 1: Detect the content type strictly as one of:
"social_post", "resume", "quote", "document", "other"

Step 2: ALWAYS return an engagement_score (0-100) with a reason. If the type is unknown, return 0 with a note explaining why.

Step 3: ENSURE ALL FIELDS ARE ALWAYS PRESENT. Never omit a field. Use empty strings or empty arrays when nothing applies.

Step 4: OUTPUT STRICT JSON ONLY. No prose before or after it and no code fences. Use exactly this structure:

{
  "content_type": "",
  "analysis": "",
  "extracted_text_summary": "",
  "engagement_score": {
    "score": 0,
    "reason": ""
  },
  "suggestions": {
    "message": "",
    "actions": [],
    "hooks": [],
    "callToAction": [],
    "hashtags": []
  }
}

Field notes:
- content_type: one of the five values above
- analysis: detailed analysis of the content, or ""
- extracted_text_summary: short summary of the content, or ""
- engagement_score.score: integer from 0 to 100
- suggestions.message: general strategy message, or ""
- suggestions.actions: actionable improvements
- suggestions.hooks: viral hook lines
- suggestions.callToAction: calls to action
- suggestions.hashtags: recommended hashtags

Content to analyze:
{content}"#;

/// Render the analysis prompt for a piece of extracted text.
pub fn analysis_prompt(content: &str) -> String {
    ANALYSIS_PROMPT.replace("{content}", content)
}
