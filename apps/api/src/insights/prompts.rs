// All LLM prompt constants for the Insights module.
// Reuses cross-cutting fragments from llm_client::prompts.

/// System prompt for profession insights: enforces JSON-only output.
pub const INSIGHTS_SYSTEM: &str =
    "You are an expert career advisor and resume writer with deep knowledge of \
    Applicant Tracking Systems (ATS). \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Profession insights prompt template. Replace `{profession}` before sending.
pub const INSIGHTS_PROMPT_TEMPLATE: &str = r#"For the profession "{profession}", generate a JSON object with this EXACT structure.
Use camelCase for keys and double quotes for all keys and string values.

{
  "atsKeywords": ["10-15 essential ATS keywords: technical skills, soft skills, industry jargon"],
  "summary": "A 3-4 sentence professional summary template, optimized with keywords.",
  "certifications": ["3-5 highly-regarded professional certifications"],
  "salaryRange": {
    "entry": "Entry-level salary range in USD, e.g. '$60,000 - $80,000'",
    "mid": "Mid-level salary range in USD",
    "senior": "Senior-level salary range in USD",
    "expert": "Expert-level salary range in USD"
  },
  "industryInsights": {
    "trends": ["3-4 current industry trends"],
    "challenges": ["2-3 common challenges in this role"],
    "opportunities": ["2-3 growth opportunities"]
  },
  "recommendedCourses": [
    {"name": "Course name", "provider": "Course provider", "level": "Difficulty level"}
  ],
  "projectIdeas": ["Three portfolio project ideas that would impress a hiring manager"]
}

Output ONLY the raw JSON object."#;

/// Field correction prompt. Replace `{field}` and `{value}` before sending.
pub const FIELD_SUGGESTION_PROMPT_TEMPLATE: &str = r#"You are a resume writing assistant. For the field "{field}", the user entered: "{value}".
If there are any grammar or spelling mistakes, correct them. If the sentence can be improved, rewrite it in a more professional and concise way.
Respond with only the improved/corrected sentence. If the input is already good, return it as is."#;

/// ATS scoring prompt. Replace `{record_json}` before sending.
pub const ATS_SCORE_PROMPT_TEMPLATE: &str = r#"You are an ATS (Applicant Tracking System) scoring engine. Given the following CV data as JSON, return a single integer score from 0 to 100 representing how well this CV would perform for ATS screening.
CV Data: {record_json}
Respond with only the integer score."#;
