pub mod ask_question_route;
pub mod schema_route;
