//! # Membership Commands
//!
//! Loyalty-club sign-up, the member profile and guest reviews.
//!
//! Members earn one point per whole currency unit of each completed order
//! linked to them; the tier follows the lifetime points.

use bistro_core::{Member, MemberUpdate, NewMember, NewReview, Review, ReviewStatus};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::StoreState;

// =============================================================================
// Members
// =============================================================================

/// Signs a guest up. The email must not belong to an existing member.
pub fn join_membership(store: &StoreState, input: NewMember) -> Result<Member, ApiError> {
    debug!("join_membership command");

    let member = store.dispatch(|s| s.add_member(input))?;
    info!(member_id = %member.id, "Member joined");
    Ok(member)
}

pub fn get_member(store: &StoreState, id: &str) -> Result<Member, ApiError> {
    store
        .with_store(|s| s.member(id).cloned())
        .ok_or_else(|| ApiError::not_found("Member", id))
}

/// "Already a member?" lookup; the email match ignores case.
pub fn find_member(store: &StoreState, email: &str) -> Result<Member, ApiError> {
    store
        .with_store(|s| s.find_member_by_email(email).cloned())
        .ok_or_else(|| ApiError::not_found("Member", email.trim()))
}

pub fn update_profile(
    store: &StoreState,
    id: &str,
    update: MemberUpdate,
) -> Result<Member, ApiError> {
    debug!(member_id = %id, "update_profile command");
    Ok(store.dispatch(|s| s.update_member(id, update))?)
}

// =============================================================================
// Reviews
// =============================================================================

/// Public review wall: approved reviews, newest first, with the average.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSummary {
    pub average_rating: f64,
    pub count: usize,
    pub reviews: Vec<Review>,
}

/// Collects a review. It is held for moderation and not shown until
/// approved in the CMS.
pub fn submit_review(store: &StoreState, input: NewReview) -> Result<Review, ApiError> {
    debug!(rating = input.rating, "submit_review command");

    let review = store.dispatch(|s| s.add_review(input))?;
    info!(review_id = %review.id, "Review submitted");
    Ok(review)
}

pub fn list_reviews(store: &StoreState) -> ReviewSummary {
    store.with_store(|s| {
        let mut reviews: Vec<Review> = s
            .reviews
            .iter()
            .filter(|r| r.status == ReviewStatus::Approved)
            .cloned()
            .collect();
        reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        ReviewSummary {
            average_rating: s.average_rating(),
            count: reviews.len(),
            reviews,
        }
    })
}
