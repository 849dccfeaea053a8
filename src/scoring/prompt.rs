//! Prompt template for the orchestrator agent.

use crate::api::types::ScoreRequest;

/// Render a scoring request into the orchestrator prompt.
pub fn build_fit_prompt(request: &ScoreRequest) -> String {
    let company_desc = request
        .company_desc
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(|d| format!("Company Description:\n{}\n\n", d))
        .unwrap_or_default();

    format!(
        r#"You are the Orchestrator. Run this agent chain in order:
1) ResumeExtractor on the resume text.
2) JobDescriptionExtractor on the job description text.
3) HardSkillsMatcher with resume_extracted and job_description_extracted.
4) SoftSkillsMatcher with company name, job description, and resume.
5) FitReranker with hard_skills and soft_skills.

Return ONLY the final FitReranker JSON:
{{
  "score": 0,
  "softSkillFeedback": [],
  "techSkillFeedback": []
}}

Inputs:

Company Name:
{company_name}

{company_desc}Job Description:
{job_desc}

Resume:
{resume}
"#,
        company_name = request.company_name,
        company_desc = company_desc,
        job_desc = request.job_desc,
        resume = request.resume,
    )
}
