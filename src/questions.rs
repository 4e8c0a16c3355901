//! The fixed question table, ordered by id.

use crate::types::{Question, QuestionId, QUESTION_COUNT};
use std::sync::OnceLock;

const QUESTION_TABLE: [(QuestionId, &str, i64); QUESTION_COUNT as usize] = [
    (1, "How many dimples does an average golf ball have?", 336),
    (2, "How many miles of blood vessels are in the human body?", 60000),
    (3, "How many years old is Jonathan, the oldest known tortoise?", 190),
    (4, "How many pounds did the world's largest pumpkin weigh?", 2749),
    (5, "How many inches of snow fell in the deepest one-day snowfall ever recorded in the U.S.?", 76),
    (6, "How many inches wide was the largest snowflake ever recorded?", 15),
    (7, "At what air temperature (in F) does human breath start to become visible?", 45),
    (8, "How many calories can a person burn by shivering for one hour?", 450),
    (9, "How many inches thick should lake ice be to safely support a car?", 10),
    (10, "What was the lowest wind chill temperature ever recorded in the United States (in F)?", -109),
    (11, "How many pounds of snow are in an average three-ball snowman?", 350),
    (12, "How many candles would it take to raise the temperature of a small room by 1F?", 40),
    (13, "In what year did Amazon Prime launch?", 2005),
    (14, "How many employees did Amazon have in 1996?", 151),
    (15, "What were Amazon's total sales in 1998 (in millions of dollars)?", 610),
    (16, "During its big 2016 expansion, Amazon Prime Video launched in how many countries?", 200),
    (17, "How many hours per year does the average office worker spend waiting for their computer to load?", 22),
    (18, "How many miles does the average person walk over their lifetime?", 110000),
    (19, "How many miles per hour was the fastest tennis serve ever recorded?", 157),
    (20, "How many feet long is the world's longest single escalator?", 367),
    (21, "How many Google searches happen every second worldwide?", 99000),
    (22, "How many hours of video are uploaded to YouTube worldwide every six hours?", 180000),
    (23, "How many years passed between the completion of the Great Pyramid of Giza and the birth of Cleopatra?", 2530),
    (24, "How many billion people are estimated to have ever lived on Earth in total?", 117),
    (25, "For about how many years have anatomically modern humans (Homo sapiens) existed?", 300000),
];

/// All questions, ordered by id
pub fn all() -> &'static [Question] {
    static QUESTIONS: OnceLock<Vec<Question>> = OnceLock::new();
    QUESTIONS.get_or_init(|| {
        QUESTION_TABLE
            .iter()
            .map(|(id, prompt, answer)| Question {
                id: *id,
                prompt: prompt.to_string(),
                answer: *answer,
            })
            .collect()
    })
}

/// Look up a question by id
pub fn get(id: QuestionId) -> Option<&'static Question> {
    all().iter().find(|q| q.id == id)
}
