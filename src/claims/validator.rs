use crate::claims::Claims;
use crate::error::{Error, Result};

use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::debug;

/// Server-side parameters for [`Claims::validate`]
///
/// Accepted-value lists are exact string matches. A claim that is absent from
/// the token always passes its rule; a claim that is present must appear in
/// its list, so an empty list rejects any present value. The `jti` list is the
/// exception: it is only consulted when non-empty.
///
/// Reference times default to the wall clock at validation time.
#[derive(Debug, Clone, Default)]
pub struct ValidationParams {
    pub jwt_ids: Vec<String>,
    pub issuers: Vec<String>,
    pub subjects: Vec<String>,
    pub audiences: Vec<String>,

    pub expiration_time: Option<SystemTime>,
    pub expiration_leeway: Duration,

    pub not_before_time: Option<SystemTime>,
    pub not_before_leeway: Duration,
}

impl ValidationParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn accept_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuers.push(issuer.into());
        self
    }

    pub fn accept_subject(mut self, subject: impl Into<String>) -> Self {
        self.subjects.push(subject.into());
        self
    }

    pub fn accept_audience(mut self, audience: impl Into<String>) -> Self {
        self.audiences.push(audience.into());
        self
    }

    pub fn accept_jwt_id(mut self, jwt_id: impl Into<String>) -> Self {
        self.jwt_ids.push(jwt_id.into());
        self
    }

    /// Reference time for `exp`
    pub fn expiration_time(mut self, at: SystemTime) -> Self {
        self.expiration_time = Some(at);
        self
    }

    pub fn expiration_leeway(mut self, leeway: Duration) -> Self {
        self.expiration_leeway = leeway;
        self
    }

    /// Reference time for `nbf`
    pub fn not_before_time(mut self, at: SystemTime) -> Self {
        self.not_before_time = Some(at);
        self
    }

    pub fn not_before_leeway(mut self, leeway: Duration) -> Self {
        self.not_before_leeway = leeway;
        self
    }

    /// Use `at` as the reference time for both `exp` and `nbf`
    pub fn reference_time(self, at: SystemTime) -> Self {
        self.expiration_time(at).not_before_time(at)
    }

    /// Apply the same leeway to `exp` and `nbf`
    pub fn leeway(self, leeway: Duration) -> Self {
        self.expiration_leeway(leeway).not_before_leeway(leeway)
    }
}

/// Whole seconds since the Unix epoch, rounded toward negative infinity
fn unix_seconds(at: SystemTime) -> i64 {
    match at.duration_since(UNIX_EPOCH) {
        Ok(after) => i64::try_from(after.as_secs()).unwrap_or(i64::MAX),
        Err(before) => {
            let before = before.duration();
            let whole = i64::try_from(before.as_secs()).unwrap_or(i64::MAX);
            let floor = if before.subsec_nanos() > 0 { 1 } else { 0 };
            whole.saturating_neg().saturating_sub(floor)
        }
    }
}

fn leeway_seconds(leeway: Duration) -> i64 {
    i64::try_from(leeway.as_secs()).unwrap_or(i64::MAX)
}

fn parse_time_claim(claim: &'static str, value: &str) -> Result<i64> {
    value.parse::<i64>().map_err(|_| Error::ClaimParse {
        claim,
        value: value.to_string(),
    })
}

/// An empty claim is treated as absent
fn present(claim: &Option<String>) -> Option<&str> {
    claim.as_deref().filter(|value| !value.is_empty())
}

fn any_equals<S: AsRef<str>>(accepted: &[S], value: &str) -> bool {
    accepted.iter().any(|candidate| candidate.as_ref() == value)
}

impl Claims {
    /// `nbf` rule: valid when `reference + leeway > nbf`; passes if absent or empty
    pub fn verify_not_before(&self, reference: SystemTime, leeway: Duration) -> Result<bool> {
        let Some(value) = present(&self.not_before) else {
            return Ok(true);
        };
        let not_before = parse_time_claim("nbf", value)?;
        Ok(unix_seconds(reference).saturating_add(leeway_seconds(leeway)) > not_before)
    }

    /// `exp` rule: valid when `reference - leeway < exp`; passes if absent or empty
    pub fn verify_expiration(&self, reference: SystemTime, leeway: Duration) -> Result<bool> {
        let Some(value) = present(&self.expiration) else {
            return Ok(true);
        };
        let expiration = parse_time_claim("exp", value)?;
        Ok(unix_seconds(reference).saturating_sub(leeway_seconds(leeway)) < expiration)
    }

    pub fn verify_issuer<S: AsRef<str>>(&self, accepted: &[S]) -> bool {
        present(&self.issuer).is_none_or(|issuer| any_equals(accepted, issuer))
    }

    pub fn verify_subject<S: AsRef<str>>(&self, accepted: &[S]) -> bool {
        present(&self.subject).is_none_or(|subject| any_equals(accepted, subject))
    }

    pub fn verify_audience<S: AsRef<str>>(&self, accepted: &[S]) -> bool {
        present(&self.audience).is_none_or(|audience| any_equals(accepted, audience))
    }

    pub fn verify_jwt_id<S: AsRef<str>>(&self, accepted: &[S]) -> bool {
        present(&self.jwt_id).is_none_or(|jwt_id| any_equals(accepted, jwt_id))
    }

    /// Apply the registered-claim rules in order, stopping at the first failure
    ///
    /// Without parameters only `nbf` and `exp` are checked, against the wall
    /// clock with zero leeway. The only error is a malformed `nbf` or `exp`.
    pub fn validate(&self, params: Option<&ValidationParams>) -> Result<bool> {
        let now = SystemTime::now();

        let (nbf_at, nbf_leeway, exp_at, exp_leeway) = match params {
            Some(p) => (
                p.not_before_time.unwrap_or(now),
                p.not_before_leeway,
                p.expiration_time.unwrap_or(now),
                p.expiration_leeway,
            ),
            None => (now, Duration::ZERO, now, Duration::ZERO),
        };

        if !self.verify_not_before(nbf_at, nbf_leeway)? {
            debug!(claim = "nbf", "claims rejected");
            return Ok(false);
        }
        if !self.verify_expiration(exp_at, exp_leeway)? {
            debug!(claim = "exp", "claims rejected");
            return Ok(false);
        }

        let Some(params) = params else {
            return Ok(true);
        };

        let rejected = if !self.verify_issuer(&params.issuers) {
            Some("iss")
        } else if !self.verify_subject(&params.subjects) {
            Some("sub")
        } else if !self.verify_audience(&params.audiences) {
            Some("aud")
        } else if !params.jwt_ids.is_empty() && !self.verify_jwt_id(&params.jwt_ids) {
            Some("jti")
        } else {
            None
        };

        match rejected {
            Some(claim) => {
                debug!(claim, "claims rejected");
                Ok(false)
            }
            None => Ok(true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(seconds: u64) -> SystemTime {
        UNIX_EPOCH + Duration::from_secs(seconds)
    }

    fn now() -> i64 {
        unix_seconds(SystemTime::now())
    }

    #[test]
    fn test_expiration_reference_times() {
        let claims = Claims::new().with_issuer("joe").with_expiration(1300819380);
        let params = ValidationParams::new()
            .accept_issuer("joe")
            .reference_time(at(1300819379));
        assert!(claims.validate(Some(&params)).unwrap());

        let params = params.reference_time(at(1300819381));
        assert!(!claims.validate(Some(&params)).unwrap());
    }

    #[test]
    fn test_expiration_boundary_is_exclusive() {
        let claims = Claims::new().with_expiration(100);
        assert!(claims.verify_expiration(at(99), Duration::ZERO).unwrap());
        assert!(!claims.verify_expiration(at(100), Duration::ZERO).unwrap());
        assert!(claims
            .verify_expiration(at(100), Duration::from_secs(1))
            .unwrap());
    }

    #[test]
    fn test_not_before_boundary_is_exclusive() {
        let claims = Claims::new().with_not_before(100);
        assert!(!claims.verify_not_before(at(100), Duration::ZERO).unwrap());
        assert!(claims.verify_not_before(at(101), Duration::ZERO).unwrap());
        assert!(claims
            .verify_not_before(at(95), Duration::from_secs(6))
            .unwrap());
        assert!(!claims
            .verify_not_before(at(95), Duration::from_secs(5))
            .unwrap());
    }

    #[test]
    fn test_subsecond_reference_truncated() {
        let claims = Claims::new().with_not_before(100);
        let reference = at(100) + Duration::from_millis(900);
        assert!(!claims.verify_not_before(reference, Duration::ZERO).unwrap());
    }

    #[test]
    fn test_malformed_time_claims() {
        let claims = Claims {
            expiration: Some("not-a-number".to_string()),
            ..Claims::default()
        };
        let err = claims.validate(None).unwrap_err();
        assert_eq!(
            err,
            Error::ClaimParse {
                claim: "exp",
                value: "not-a-number".to_string()
            }
        );

        let claims = Claims {
            not_before: Some("1.5".to_string()),
            ..Claims::default()
        };
        assert!(matches!(
            claims.validate(None),
            Err(Error::ClaimParse { claim: "nbf", .. })
        ));
    }

    #[test]
    fn test_no_params_still_checks_time() {
        assert!(Claims::new().validate(None).unwrap());

        let expired = Claims::new().with_expiration(now() - 10);
        assert!(!expired.validate(None).unwrap());

        let future = Claims::new().with_not_before(now() + 3600);
        assert!(!future.validate(None).unwrap());

        // Issuer rules are skipped without parameters
        let claims = Claims::new()
            .with_issuer("anyone")
            .with_expiration(now() + 3600);
        assert!(claims.validate(None).unwrap());
    }

    #[test]
    fn test_absent_reference_defaults_to_now() {
        let claims = Claims::new().with_expiration(now() - 10);
        let params = ValidationParams::new();
        assert!(!claims.validate(Some(&params)).unwrap());

        let params = ValidationParams::new().expiration_leeway(Duration::from_secs(60));
        assert!(claims.validate(Some(&params)).unwrap());
    }

    #[test]
    fn test_accepted_sets() {
        let claims = Claims::new()
            .with_issuer("joe")
            .with_subject("user-1")
            .with_audience("api");

        let params = ValidationParams::new()
            .accept_issuer("ann")
            .accept_issuer("joe")
            .accept_subject("user-1")
            .accept_audience("api");
        assert!(claims.validate(Some(&params)).unwrap());

        let wrong_sub = ValidationParams {
            subjects: vec!["user-2".to_string()],
            ..params.clone()
        };
        assert!(!claims.validate(Some(&wrong_sub)).unwrap());

        let no_audiences = ValidationParams {
            audiences: Vec::new(),
            ..params.clone()
        };
        assert!(!claims.validate(Some(&no_audiences)).unwrap());
    }

    #[test]
    fn test_absent_claims_pass_any_set() {
        let claims = Claims::new();
        assert!(claims.verify_issuer::<&str>(&[]));
        assert!(claims.verify_subject(&["x"]));
        assert!(claims.verify_audience::<String>(&[]));

        let params = ValidationParams::new().accept_issuer("joe");
        assert!(claims.validate(Some(&params)).unwrap());
    }

    #[test]
    fn test_empty_claims_count_as_absent() {
        let claims = Claims {
            issuer: Some(String::new()),
            subject: Some(String::new()),
            audience: Some(String::new()),
            jwt_id: Some(String::new()),
            not_before: Some(String::new()),
            expiration: Some(String::new()),
            ..Claims::default()
        };
        assert!(claims.verify_issuer::<&str>(&[]));
        assert!(claims.verify_subject(&["x"]));
        assert!(claims.verify_audience::<String>(&[]));
        assert!(claims.verify_jwt_id(&["y"]));
        assert!(claims.verify_not_before(at(0), Duration::ZERO).unwrap());
        assert!(claims.verify_expiration(at(u32::MAX as u64), Duration::ZERO).unwrap());

        let params = ValidationParams::new()
            .accept_issuer("joe")
            .accept_jwt_id("abc");
        assert!(claims.validate(Some(&params)).unwrap());
    }

    #[test]
    fn test_whitespace_claim_is_not_empty() {
        let claims = Claims::new().with_subject(" ");
        assert!(!claims.verify_subject(&["x"]));
        assert!(claims.verify_subject(&[" "]));
    }

    #[test]
    fn test_jwt_id_only_checked_when_listed() {
        let claims = Claims::new().with_jwt_id("abc");
        assert!(claims.validate(Some(&ValidationParams::new())).unwrap());

        let params = ValidationParams::new().accept_jwt_id("xyz");
        assert!(!claims.validate(Some(&params)).unwrap());

        let params = params.accept_jwt_id("abc");
        assert!(claims.validate(Some(&params)).unwrap());
    }

    #[test]
    fn test_nbf_checked_before_exp() {
        // nbf fails first, so the malformed exp is never parsed
        let claims = Claims {
            not_before: Some((now() + 3600).to_string()),
            expiration: Some("garbage".to_string()),
            ..Claims::default()
        };
        assert!(!claims.validate(None).unwrap());
    }

    #[test]
    fn test_unix_seconds_before_epoch() {
        assert_eq!(unix_seconds(UNIX_EPOCH), 0);
        assert_eq!(unix_seconds(UNIX_EPOCH - Duration::from_secs(5)), -5);
        assert_eq!(unix_seconds(UNIX_EPOCH - Duration::from_millis(1500)), -2);
    }
}
