use ::slug::slugify;

/// Base used when a title has no sluggable characters at all.
const FALLBACK_SLUG: &str = "idea";

/// Normalize a title into its unsuffixed slug.
pub fn base_slug(title: &str) -> String {
    let base = slugify(title);
    if base.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        base
    }
}

/// Pick the slug for a new idea titled `title`.
///
/// `existing` holds the slugs already taken that share this title's base
/// (the store's `slugs_with_base`). The base itself is returned when free,
/// otherwise the lowest free `base-N` with N starting at 2.
pub fn assign(title: &str, existing: &[String]) -> String {
    let base = base_slug(title);
    let taken = |candidate: &str| existing.iter().any(|s| s == candidate);

    if !taken(&base) {
        return base;
    }

    let mut n: u64 = 2;
    loop {
        let candidate = format!("{base}-{n}");
        if !taken(&candidate) {
            return candidate;
        }
        n += 1;
    }
}
