pub mod answer_question;
pub mod ask_request;
pub mod review_question_route;
pub mod test_question_route;
