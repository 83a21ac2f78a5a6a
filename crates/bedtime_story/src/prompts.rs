//! Prompt builders, one per pipeline stage.
//!
//! Builders are pure: context values are substituted verbatim (no trimming,
//! truncation or escaping) and the same inputs always produce the same text.

use crate::{JudgeFeedback, Outline, Story, UserFeedback, UserRequest};

/// Label the judge is told to emit before its overall verdict.
pub const OVERALL_SCORE_LABEL: &str = "Overall Score:";

/// Prompt asking for a bullet-point plan of the story.
///
/// # Examples
///
/// ```
/// use bedtime_story::{UserRequest, prompts::outline_prompt};
///
/// let request = UserRequest::new("A story about a lighthouse keeper's daughter").unwrap();
/// let prompt = outline_prompt(&request);
/// assert!(prompt.contains("\"A story about a lighthouse keeper's daughter\""));
/// assert!(prompt.contains("Do NOT write the full story"));
/// ```
pub fn outline_prompt(request: &UserRequest) -> String {
    format!(
        r#"
You are a children's storyteller preparing to write a bedtime story for ages 5–10.

Based on this request:
"{request}"

Create a short internal outline for the story that fully satisfies this request.
Include:
- A main character and one clear, age-appropriate goal or desire
- One primary meaningful challenge or obstacle to their goal that creates mild tension
- One or more minor missteps, small setbacks, or surprises
- Decisions or actions the character takes to address each challenge, building to a gentle climax
- How the character grows or learns through these experiences
- A resolution that feels natural and concise

Constraints:
- Keep bullets brief (1–2 sentences each)
- Do NOT write the full story
- Keep it age-appropriate
- Fully satisfy the request
- No violence or frightening themes

Return only the plan as bullet points.
"#,
        request = request.as_str()
    )
}

/// Prompt asking for the story itself, optionally following an outline.
pub fn story_prompt(request: &UserRequest, outline: Option<&Outline>) -> String {
    let plan = outline
        .map(|o| {
            format!(
                "Follow this internal outline to guide the story:\n{}\n",
                o.as_str()
            )
        })
        .unwrap_or_default();

    format!(
        r#"
You are a warm, imaginative storyteller telling a bedtime story to a child aged 5–10.

Tell a bedtime story inspired by the following request:
"{request}"

{plan}

Story requirements:
- Fully satisfies the story request
- One clear main character with a simple, age-appropriate desire or goal
- One primary meaningful challenge and one or more minor obstacles that requires problem-solving by the main character
- Key decisions and actions the main character takes to overcome challenges
- A satisfying resolution where the character grows or changes in a small, positive way
- The final sentences should feel like the story has completed, not like it is sending the reader off to bed.
- Make sure the main character actively drives the story through choices and actions

General guidance:
- Story should be around 400 words
- Write as if telling the story aloud to a child
- Structure clearly with a beginning, middle, and very brief ending
- Keep language simple, natural, and age-appropriate (5–10 years); No violence or frightening themes
- Keep the tone warm, comforting, and safe
- Show rather than tell, using sensory details and/or meaningful dialogue
- Avoid signposting
- Prefer natural tension and small setbacks over overly neat problem-solving

Guidance on story ending:
- Keep the ending brief and natural
- Avoid telling the reader lessons, morals, or what to feel
- Do not include any bedtime references including to sleep, dreams, wishing good night

Return only the story text.
"#,
        request = request.as_str(),
        plan = plan
    )
}

/// Prompt asking the evaluator to score a story.
///
/// The evaluator is told to put its verdict on a line of the form
/// `Overall Score: N` so [`crate::extract_score`] can find it.
pub fn judge_prompt(story: &Story, request: &UserRequest) -> String {
    format!(
        r#"
You are a judge evaluating a bedtime story for children aged 5–10.

Here is the user's request:
---
{request}
---

Here is the story:
---
{story}
---

Evaluate the story using the following criteria.
For each category, give a score from 1 (poor) to 5 (excellent) AND a brief explanation.

Categories:
1. Age appropriateness
2. Narrative structure (objective, obstacle, conflict, resolution)
3. Engagement and imagination
4. Satisfaction of user request. For this category only, give a 1 if it doesn't satisfy any part of the request.
5. Clarity, coherence, and natural storytelling

Then provide:
- An Overall Score (1–5), written on its own line exactly as "{label} N" where N is a single digit
- A short bullet-point list of specific suggestions for improvement

Format the response clearly so scores are easy to identify.
Do NOT rewrite the story.
"#,
        request = request.as_str(),
        story = story.as_str(),
        label = OVERALL_SCORE_LABEL
    )
}

/// Prompt asking for a full rewrite that addresses the judge's feedback.
pub fn revise_prompt(story: &Story, feedback: &JudgeFeedback, request: &UserRequest) -> String {
    format!(
        r#"
You are a children's storyteller revising a bedtime story that is based on a user request.

Original story:
---
{story}
---

Evaluation and feedback from a story judge:
---
{feedback}
---

User request:
---
{request}
---

Rewrite the entire story to address the judge's feedback, with special attention to:
- Fully satisfying the user's request
- Strengthening the character's goal, obstacle, conflict, and resolution
- Fixing any coherence or consistency issues
- Ensuring events logically follow from one another
- Keeping it appropriate for ages 5–10
- Maintaining a calm, comforting bedtime tone

Return only the revised story.
"#,
        story = story.as_str(),
        feedback = feedback.as_str(),
        request = request.as_str()
    )
}

/// Prompt asking for a rewrite driven by the operator's own feedback.
///
/// Unlike [`revise_prompt`], the model may change anything about the plot,
/// characters or outcome.
pub fn user_revision_prompt(story: &Story, feedback: &UserFeedback) -> String {
    format!(
        r#"
You are a children's storyteller revising a bedtime story based on user feedback.
You may change anything in the story (including character roles, events, and outcomes)
to fully satisfy the feedback.

Current story:
---
{story}
---

User feedback:
---
{feedback}
---

Rewrite the entire story to incorporate the feedback while:
- Keeping it appropriate for ages 5–10
- Maintaining a calm, comforting bedtime tone
- Keeping the story cohesive and natural

Return only the rewritten story.
"#,
        story = story.as_str(),
        feedback = feedback.as_str()
    )
}
