use anyhow::Context;
use axum::extract::Multipart;
use tracing::{info, warn};
use uuid::Uuid;

use super::dto::{AvatarUpload, RegisterRequest, UserChanges};
use super::repo_types::{NewUser, User};
use crate::{
    auth::password::hash_password,
    error::{AppError, FieldErrors},
    state::AppState,
    validation::{
        check_format, clean, is_github_url, is_linkedin_url, is_promotion, is_valid_email,
        require,
    },
};

fn clean_languages(languages: Vec<String>) -> Vec<String> {
    languages
        .into_iter()
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .collect()
}

fn check_profile(errors: &mut FieldErrors, user: &ProfileFields<'_>) {
    require(errors, "name", user.name);
    check_format(errors, "githubUrl", user.github_url, is_github_url);
    check_format(errors, "linkedinUrl", user.linkedin_url, is_linkedin_url);
    check_format(errors, "promotion", user.promotion, is_promotion);
}

struct ProfileFields<'a> {
    name: &'a str,
    github_url: Option<&'a str>,
    linkedin_url: Option<&'a str>,
    promotion: Option<&'a str>,
}

/// Validates a registration body and hashes its password. The invite code is
/// checked by the caller before this runs.
pub fn new_user_from(req: RegisterRequest) -> Result<NewUser, AppError> {
    let email = req.email.unwrap_or_default().trim().to_lowercase();
    let password = req.password.unwrap_or_default();
    let name = req.name.unwrap_or_default().trim().to_string();
    let github_url = clean(req.github_url);
    let linkedin_url = clean(req.linkedin_url);
    let promotion = clean(req.promotion);

    let mut errors = FieldErrors::new();
    require(&mut errors, "email", &email);
    if !email.is_empty() && !is_valid_email(&email) {
        errors.insert("email", "invalid format".into());
    }
    if password.is_empty() {
        errors.insert("password", "is required".into());
    }
    check_profile(
        &mut errors,
        &ProfileFields {
            name: &name,
            github_url: github_url.as_deref(),
            linkedin_url: linkedin_url.as_deref(),
            promotion: promotion.as_deref(),
        },
    );
    AppError::check(errors)?;

    Ok(NewUser {
        email,
        password_hash: hash_password(&password)?,
        name,
        bio: clean(req.bio),
        github_url,
        linkedin_url,
        location: clean(req.location),
        languages: clean_languages(req.languages),
        avatar_url: clean(req.avatar_url),
        promotion,
    })
}

/// Copies the allow-listed fields of `changes` onto a copy of `user` and
/// validates the result.
pub fn apply_changes(user: &User, changes: UserChanges) -> Result<User, AppError> {
    let mut updated = user.clone();
    if let Some(name) = changes.name {
        updated.name = name.trim().to_string();
    }
    if changes.bio.is_some() {
        updated.bio = clean(changes.bio);
    }
    if changes.github_url.is_some() {
        updated.github_url = clean(changes.github_url);
    }
    if changes.linkedin_url.is_some() {
        updated.linkedin_url = clean(changes.linkedin_url);
    }
    if changes.location.is_some() {
        updated.location = clean(changes.location);
    }
    if let Some(languages) = changes.languages {
        updated.languages = clean_languages(languages);
    }
    if changes.promotion.is_some() {
        updated.promotion = clean(changes.promotion);
    }

    let mut errors = FieldErrors::new();
    if matches!(changes.password.as_deref(), Some("")) {
        errors.insert("password", "is required".into());
    }
    check_profile(
        &mut errors,
        &ProfileFields {
            name: &updated.name,
            github_url: updated.github_url.as_deref(),
            linkedin_url: updated.linkedin_url.as_deref(),
            promotion: updated.promotion.as_deref(),
        },
    );
    AppError::check(errors)?;

    if let Some(password) = changes.password {
        updated.password_hash = hash_password(&password)?;
    }
    Ok(updated)
}

/// Reads a multipart profile update: text parts map onto [`UserChanges`]
/// and an `avatar` file part becomes the upload.
pub async fn read_multipart(
    mut mp: Multipart,
) -> Result<(UserChanges, Option<AvatarUpload>), AppError> {
    let mut changes = UserChanges::default();
    let mut avatar = None;

    while let Some(field) = mp.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        if name == "avatar" {
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let body = field.bytes().await?;
            avatar = Some(AvatarUpload { body, content_type });
            continue;
        }

        let value = field.text().await?;
        match name.as_str() {
            "name" => changes.name = Some(value),
            "password" => changes.password = Some(value),
            "bio" => changes.bio = Some(value),
            "githubUrl" => changes.github_url = Some(value),
            "linkedinUrl" => changes.linkedin_url = Some(value),
            "location" => changes.location = Some(value),
            "promotion" => changes.promotion = Some(value),
            "languages" | "languages[]" => changes
                .languages
                .get_or_insert_with(Vec::new)
                .extend(value.split(',').map(String::from)),
            _ => {}
        }
    }
    Ok((changes, avatar))
}

fn ext_from_mime(ct: &str) -> Option<&'static str> {
    match ct {
        "image/jpeg" | "image/jpg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/webp" => Some("webp"),
        "image/gif" => Some("gif"),
        _ => None,
    }
}

/// A stored avatar and the key of the object it replaces, if that one lives
/// in our bucket.
#[derive(Debug)]
pub struct StoredAvatar {
    pub url: String,
    pub replaced_key: Option<String>,
}

/// Stores the avatar. The previous object is left in place; call
/// [`discard_avatar`] once the new URL is saved.
pub async fn upload_avatar(
    st: &AppState,
    user: &User,
    upload: AvatarUpload,
) -> Result<StoredAvatar, AppError> {
    let Some(ext) = ext_from_mime(&upload.content_type) else {
        let mut errors = FieldErrors::new();
        errors.insert("avatar", "must be a jpeg, png, webp or gif image".into());
        return Err(AppError::Validation(errors));
    };

    let key = format!("avatars/{}/{}.{}", user.id, Uuid::new_v4(), ext);
    st.storage
        .put_object(&key, upload.body, &upload.content_type)
        .await
        .with_context(|| format!("put_object {}", key))?;
    info!(user_id = %user.id, %key, "avatar uploaded");

    Ok(StoredAvatar {
        url: st.storage.public_url(&key),
        replaced_key: user
            .avatar_url
            .as_deref()
            .and_then(|url| st.storage.key_for_url(url)),
    })
}

/// Best effort: a failed delete only leaves an orphaned object behind.
pub async fn discard_avatar(st: &AppState, key: &str) {
    if let Err(e) = st.storage.delete_object(key).await {
        warn!(error = %e, %key, "could not delete previous avatar");
    }
}
