//! Prompt templates for the ranking calls.
//!
//! Substitution placeholders: `{requirements}` and `{competencies_table}`.
//! The table is injected in markdown form; the model reads proficiency per
//! entity per skill directly from it.

/// System prompt shared by both ranking variants — enforces JSON-only output
/// against the fixed response schema.
pub const RANKING_SYSTEM: &str = "You are a precise talent-matching assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Return a JSON object with this EXACT schema: \
    {\"rating\": [{\"name\": \"<employee full name>\", \
    \"rating\": <integer 1-100>, \
    \"goods\": [\"<skill name>\"], \
    \"bads\": [\"<skill name>\"]}]} \
    where `rating` is sorted by the rating value in descending order, \
    `goods` lists only skill names useful for the vacancy and `bads` lists \
    only skill names the person should improve.";

/// Candidate ranking instruction.
pub const CANDIDATE_RANKING_PROMPT: &str = "\
Ниже представлено ОПИСАНИЕ ВАКАНСИИ и ТАБЛИЦА КОМПЕТЕНЦИЙ возможных работников компании.
Твоя задача для каждого работника компании присвоить РЕЙТИНГ СООТВЕТСТВИЯ данной вакансии.
А затем отсортировать каждого работника по убыванию РЕЙТИНГА СООТВЕТСТВИЯ.

ОПИСАНИЕ ВАКАНСИИ:
{requirements}

ТАБЛИЦА КОМПЕТЕНЦИЙ:
{competencies_table}

Ответ:";

/// Interviewer ranking instruction — additionally explains the seniority
/// codes appended to column headers so grade weighs into the rating.
pub const INTERVIEWER_RANKING_PROMPT: &str = "\
Ниже представлено ОПИСАНИЕ ВАКАНСИИ и ТАБЛИЦА КОМПЕТЕНЦИЙ интервьюеров компании.
Твоя задача для каждого интервьюера присвоить РЕЙТИНГ СООТВЕТСТВИЯ данной вакансии.
А затем отсортировать каждого интервьюера по убыванию РЕЙТИНГА СООТВЕТСТВИЯ.
Обязательно учитывай уровень интервьюера, он прописан в скобках рядом с именем:
J* - Junior (1, 2, 3)
M* - Middle (1, 2, 3)
S* - Senior (1, 2)
Чем выше цифра рядом с уровнем, тем компетентнее специалист в своем грейде.

ОПИСАНИЕ ВАКАНСИИ:
{requirements}

ТАБЛИЦА КОМПЕТЕНЦИЙ:
{competencies_table}

Ответ:";

/// Substitutes both placeholders into a ranking template.
pub fn render_ranking_prompt(template: &str, requirements: &str, table_markdown: &str) -> String {
    template
        .replace("{requirements}", requirements)
        .replace("{competencies_table}", table_markdown)
}
