use uuid::Uuid;

use super::dto::CreateReviewRequest;
use super::repo_types::NewReview;
use crate::{
    error::{AppError, FieldErrors},
    validation::{int_in_range, require},
};

pub fn new_review_from(
    req: CreateReviewRequest,
    author_id: Uuid,
    project_id: Uuid,
) -> Result<NewReview, AppError> {
    let comment = req.comment.unwrap_or_default().trim().to_string();

    let mut errors = FieldErrors::new();
    require(&mut errors, "comment", &comment);
    let rating = int_in_range(&mut errors, "rating", req.rating.as_ref(), 1..=5);
    AppError::check(errors)?;

    Ok(NewReview {
        comment,
        rating: rating.unwrap_or_default(),
        author_id,
        project_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builds_review_from_path_and_session() {
        let (author, project) = (Uuid::new_v4(), Uuid::new_v4());
        let review = new_review_from(
            CreateReviewRequest {
                comment: Some(" Nice work ".into()),
                rating: Some(json!("4")),
            },
            author,
            project,
        )
        .unwrap();
        assert_eq!(review.comment, "Nice work");
        assert_eq!(review.rating, 4);
        assert_eq!(review.author_id, author);
        assert_eq!(review.project_id, project);
    }

    #[test]
    fn rating_must_be_an_integer_between_one_and_five() {
        for bad in [json!(0), json!(6), json!(2.5), json!("great")] {
            let err = new_review_from(
                CreateReviewRequest {
                    comment: Some("ok".into()),
                    rating: Some(bad.clone()),
                },
                Uuid::new_v4(),
                Uuid::new_v4(),
            )
            .unwrap_err();
            assert!(
                matches!(&err, AppError::Validation(e) if e.contains_key("rating")),
                "{bad} accepted"
            );
        }
    }

    #[test]
    fn comment_is_required() {
        let err = new_review_from(CreateReviewRequest::default(), Uuid::new_v4(), Uuid::new_v4())
            .unwrap_err();
        let AppError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        assert_eq!(errors["comment"], "is required");
        assert_eq!(errors["rating"], "is required");
    }
}
