use crate::routes::imports::*;
use interfacing::api::{AnswerRequest, AnswerVerdict};
use interfacing::quiz::QuestionPrompt;

pub async fn get_question(
    Extension(questions): Extension<Questions>,
) -> ApiResult<Json<QuestionPrompt>> {
    let question = questions.get_question()?;
    Ok(Json(question.prompt()))
}

pub async fn answer_question(
    Path(question_id): Path<String>,
    Extension(questions): Extension<Questions>,
    Json(AnswerRequest { answer }): Json<AnswerRequest>,
) -> Json<AnswerVerdict> {
    let correct = questions.answer_question(&question_id, answer);
    tracing::debug!(%question_id, correct, "answered question");
    Json(AnswerVerdict { correct })
}
