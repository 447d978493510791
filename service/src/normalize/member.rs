//! Member normalization: raw roster entries to canonical [`Member`]s.

use super::{classify, parse_location, NormalizeError};
use crate::model::Member;
use crate::upstream::types::RawMember;

/// Normalize a raw member record.
///
/// The id is the one hard requirement. Names default to empty, the full
/// name is the trimmed join of first and last, and contact details fall
/// back to the `communications` list when the login fields are empty.
///
/// # Errors
///
/// [`NormalizeError::MissingMemberId`] when the record has no usable id.
pub fn normalize_member(raw: &RawMember) -> Result<Member, NormalizeError> {
    let id = raw
        .id
        .as_deref()
        .filter(|id| !id.is_empty())
        .ok_or(NormalizeError::MissingMemberId)?;

    let first_name = raw.first_name.clone().unwrap_or_default();
    let last_name = raw.last_name.clone().unwrap_or_default();
    let full_name = format!("{first_name} {last_name}").trim().to_string();
    let (phone, email) = resolve_contacts(raw);

    Ok(Member {
        id: id.to_string(),
        first_name,
        last_name,
        full_name,
        status: classify(raw),
        location: parse_location(raw.location.as_ref()),
        avatar: raw.avatar.clone(),
        phone,
        email,
    })
}

/// Contact resolution: `loginPhone`/`loginEmail` win when non-empty, then
/// the first `Voice` and `Email` communication entries fill the gaps. Later
/// entries never overwrite an earlier hit.
fn resolve_contacts(raw: &RawMember) -> (Option<String>, Option<String>) {
    let mut phone = non_empty(raw.login_phone.as_deref());
    let mut email = non_empty(raw.login_email.as_deref());

    for comm in &raw.communications {
        if phone.is_some() && email.is_some() {
            break;
        }
        let (Some(channel), Some(value)) = (comm.channel.as_deref(), non_empty(comm.value.as_deref()))
        else {
            continue;
        };
        match channel {
            "Voice" if phone.is_none() => phone = Some(value),
            "Email" if email.is_none() => email = Some(value),
            _ => {}
        }
    }

    (phone, email)
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}
