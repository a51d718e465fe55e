//! Database models for Kinship
//!
//! This module contains SQLx row types and write inputs for:
//! - Member types (fixed reference data)
//! - Users, posts and profiles
//! - Subscription edges between users

pub mod member_type;
pub mod post;
pub mod profile;
pub mod subscription;
pub mod user;

pub use member_type::{MemberType, MemberTypeId};
pub use post::{ChangePost, CreatePost, Post};
pub use profile::{ChangeProfile, CreateProfile, Profile};
pub use subscription::SubscriptionEdge;
pub use user::{ChangeUser, CreateUser, User};
