//! Pure mapping of raw vendor payloads into the canonical vacancy
//! shape. No I/O here: fetchers hand in deserialized wire structs, and
//! every optional upstream field collapses to an explicit Russian
//! placeholder so the canonical shape never carries nulls.

use regex::Regex;
use std::sync::OnceLock;

use crate::error::{Error, Result};
use crate::dto::vacancy_dto::VacancyDetails;
use crate::models::raw::{HhVacancy, TvVacancy, TvVacancyEnvelope};
use crate::models::vacancy::{NewVacancy, VacancySource};

pub const DEFAULT_NOT_SPECIFIED: &str = "Не указано";
pub const DEFAULT_DUTY: &str = "Работодатель не указал должностные обязанности.";
pub const DEFAULT_PHONE: &str = "Работодатель не указал номер телефона";
pub const DEFAULT_EMAIL: &str = "Работодатель не указал адрес электронной почты.";
pub const DEFAULT_SALARY: &str = "Работодатель не указал заработную плату.";
pub const SOCIAL_PROTECTED: &str = "Инвалиды";

pub const STATUS_ACTUAL: &str = "actual";
pub const STATUS_ARCHIVAL: &str = "archival";
pub const STATUS_NOT_FOUND: &str = "not_found";

const TV_CONTACT_PHONE: &str = "Телефон";
const TV_CONTACT_EMAIL: &str = "Эл. почта";

static HTML_TAG_RE: OnceLock<Regex> = OnceLock::new();

fn html_tag_re() -> &'static Regex {
    HTML_TAG_RE.get_or_init(|| Regex::new(r"(?s)<[^>]+>").expect("static html tag pattern"))
}

/// Removes markup and stray `&nbsp` entities from vendor free text.
fn strip_html(raw: &str) -> String {
    html_tag_re()
        .replace_all(raw, "")
        .replace("&nbsp;", "")
        .replace("&nbsp", "")
}

fn or_not_specified(value: Option<&String>) -> String {
    match value {
        Some(text) if !text.is_empty() => text.clone(),
        _ => DEFAULT_NOT_SPECIFIED.to_string(),
    }
}

fn parse_error(
    vendor: VacancySource,
    vacancy_id: Option<&String>,
    employer_code: Option<&String>,
    details: &str,
) -> Error {
    Error::Parse {
        vendor,
        vacancy_id: vacancy_id.cloned().unwrap_or_else(|| "unknown".to_string()),
        employer_code: employer_code
            .cloned()
            .unwrap_or_else(|| DEFAULT_NOT_SPECIFIED.to_string()),
        details: details.to_string(),
    }
}

// --- hh.ru field extraction ---

/// Four textual salary forms synthesized from the optional
/// `{from, to}` pair: «от X до Y», «от X», «до Y», placeholder.
fn hh_salary(vacancy: &HhVacancy) -> String {
    let salary = match &vacancy.salary {
        Some(salary) => salary,
        None => return DEFAULT_SALARY.to_string(),
    };
    match (salary.from, salary.to) {
        (Some(from), Some(to)) => format!("от {from} до {to}"),
        (Some(from), None) => format!("от {from}"),
        (None, Some(to)) => format!("до {to}"),
        (None, None) => DEFAULT_SALARY.to_string(),
    }
}

// Listing snippets carry two free-text fragments; the canonical
// description concatenates them the way the original product did.
fn hh_listing_description(vacancy: &HhVacancy) -> String {
    let mut description = String::new();
    if let Some(snippet) = &vacancy.snippet {
        if let Some(responsibility) = &snippet.responsibility {
            description.push_str(responsibility);
        }
        if let Some(requirement) = &snippet.requirement {
            description.push_str("\n\nТребования: ");
            description.push_str(requirement);
        }
    }
    description.trim().to_string()
}

// An address object without a `raw` text means the employer filled in
// the form but published nothing readable; that answers with the
// placeholder rather than falling through to the area name.
fn hh_employer_location(vacancy: &HhVacancy, location: &str) -> String {
    let resolved = match &vacancy.address {
        Some(address) => address.raw.clone().unwrap_or_default(),
        None => vacancy
            .area
            .as_ref()
            .and_then(|a| a.name.clone())
            .unwrap_or_else(|| location.to_string()),
    };
    if resolved.is_empty() {
        DEFAULT_NOT_SPECIFIED.to_string()
    } else {
        resolved
    }
}

// hh.ru mirrors the aggregator's own postings back with a marker in
// the employer name; scrub it together with the parentheses.
fn hh_employer_name(vacancy: &HhVacancy) -> String {
    let raw = vacancy
        .employer
        .as_ref()
        .and_then(|employer| employer.name.clone())
        .unwrap_or_default();
    let cleaned = raw.replace("Job development", "").replace(['(', ')'], "");
    if cleaned.is_empty() {
        DEFAULT_NOT_SPECIFIED.to_string()
    } else {
        cleaned
    }
}

fn hh_listing_phone(vacancy: &HhVacancy) -> String {
    vacancy
        .contacts
        .as_ref()
        .and_then(|contacts| contacts.phones.first())
        .and_then(|phone| phone.formatted.clone())
        .unwrap_or_else(|| DEFAULT_PHONE.to_string())
}

// --- trudvsem.ru field extraction ---

fn tv_description(vacancy: &TvVacancy) -> String {
    match &vacancy.duty {
        Some(duty) if !duty.is_empty() => strip_html(duty),
        _ => DEFAULT_DUTY.to_string(),
    }
}

fn tv_contact(vacancy: &TvVacancy, contact_type: &str, default: &str) -> String {
    vacancy
        .contact_list
        .iter()
        .find(|contact| contact.contact_type.as_deref() == Some(contact_type))
        .and_then(|contact| contact.contact_value.clone())
        .unwrap_or_else(|| default.to_string())
}

/// Employer address is the first entry of the vendor's address list.
fn tv_employer_location(vacancy: &TvVacancy) -> String {
    vacancy
        .addresses
        .as_ref()
        .and_then(|addresses| addresses.address.first())
        .and_then(|address| address.location.clone())
        .filter(|location| !location.is_empty())
        .unwrap_or_else(|| DEFAULT_NOT_SPECIFIED.to_string())
}

fn tv_salary(vacancy: &TvVacancy) -> String {
    vacancy
        .salary
        .clone()
        .filter(|salary| !salary.is_empty())
        .unwrap_or_else(|| DEFAULT_SALARY.to_string())
}

// --- listing parsers ---

pub fn parse_hh_listing(vacancies: &[HhVacancy], location: &str) -> Result<Vec<NewVacancy>> {
    let mut parsed = Vec::with_capacity(vacancies.len());
    for vacancy in vacancies {
        let employer_code = vacancy.employer.as_ref().and_then(|e| e.id.as_ref());
        let vacancy_id = vacancy.id.as_ref().ok_or_else(|| {
            parse_error(
                VacancySource::Hh,
                vacancy.id.as_ref(),
                employer_code,
                "vacancy is missing its identifier",
            )
        })?;

        parsed.push(NewVacancy {
            vacancy_id: vacancy_id.clone(),
            location: location.to_string(),
            name: or_not_specified(vacancy.name.as_ref()),
            description: hh_listing_description(vacancy),
            salary: hh_salary(vacancy),
            vacancy_url: or_not_specified(vacancy.alternate_url.as_ref()),
            vacancy_source: VacancySource::Hh.tag().to_string(),
            employer_name: hh_employer_name(vacancy),
            employer_location: hh_employer_location(vacancy, location),
            employer_phone: hh_listing_phone(vacancy),
            employer_code: or_not_specified(employer_code),
            experience_required: or_not_specified(
                vacancy.experience.as_ref().and_then(|e| e.name.as_ref()),
            ),
            category: or_not_specified(
                vacancy
                    .professional_roles
                    .first()
                    .and_then(|role| role.name.as_ref()),
            ),
            employment_type: or_not_specified(
                vacancy.employment.as_ref().and_then(|e| e.name.as_ref()),
            ),
            schedule: or_not_specified(vacancy.schedule.as_ref().and_then(|s| s.name.as_ref())),
        });
    }
    Ok(parsed)
}

pub fn parse_tv_listing(
    envelopes: &[TvVacancyEnvelope],
    location: &str,
) -> Result<Vec<NewVacancy>> {
    let mut parsed = Vec::with_capacity(envelopes.len());
    for envelope in envelopes {
        let vacancy = &envelope.vacancy;
        let employer_code = vacancy.company.as_ref().and_then(|c| c.companycode.as_ref());
        let vacancy_id = vacancy.id.as_ref().ok_or_else(|| {
            parse_error(
                VacancySource::Trudvsem,
                vacancy.id.as_ref(),
                employer_code,
                "vacancy is missing its identifier",
            )
        })?;

        parsed.push(NewVacancy {
            vacancy_id: vacancy_id.clone(),
            location: location.to_string(),
            name: or_not_specified(vacancy.job_name.as_ref()),
            description: tv_description(vacancy),
            salary: tv_salary(vacancy),
            vacancy_url: or_not_specified(vacancy.vac_url.as_ref()),
            vacancy_source: VacancySource::Trudvsem.tag().to_string(),
            employer_name: or_not_specified(
                vacancy.company.as_ref().and_then(|c| c.name.as_ref()),
            ),
            employer_location: tv_employer_location(vacancy),
            employer_phone: tv_contact(vacancy, TV_CONTACT_PHONE, DEFAULT_PHONE),
            employer_code: or_not_specified(employer_code),
            experience_required: or_not_specified(
                vacancy.requirement.as_ref().and_then(|r| r.education.as_ref()),
            ),
            category: or_not_specified(
                vacancy.category.as_ref().and_then(|c| c.specialisation.as_ref()),
            ),
            employment_type: or_not_specified(vacancy.employment.as_ref()),
            schedule: or_not_specified(vacancy.schedule.as_ref()),
        });
    }
    Ok(parsed)
}

// --- detail parsers ---

pub fn parse_hh_details(vacancy: &HhVacancy) -> Result<VacancyDetails> {
    let employer_code = vacancy.employer.as_ref().and_then(|e| e.id.as_ref());
    let vacancy_id = vacancy.id.as_ref().ok_or_else(|| {
        parse_error(
            VacancySource::Hh,
            vacancy.id.as_ref(),
            employer_code,
            "vacancy details are missing the identifier",
        )
    })?;

    let status = if vacancy.archived.unwrap_or(false) {
        STATUS_ARCHIVAL
    } else {
        STATUS_ACTUAL
    };
    let description = match &vacancy.description {
        Some(raw) if !raw.is_empty() => {
            let stripped = strip_html(raw);
            if stripped.is_empty() {
                DEFAULT_NOT_SPECIFIED.to_string()
            } else {
                stripped
            }
        }
        _ => DEFAULT_NOT_SPECIFIED.to_string(),
    };
    let contacts = vacancy.contacts.as_ref();
    let employer_phone = contacts
        .and_then(|c| c.phones.first())
        .and_then(|phone| phone.number.clone())
        .unwrap_or_else(|| DEFAULT_PHONE.to_string());
    let employer_email = contacts
        .and_then(|c| c.email.clone())
        .filter(|email| !email.is_empty())
        .unwrap_or_else(|| DEFAULT_EMAIL.to_string());

    Ok(VacancyDetails {
        vacancy_id: vacancy_id.clone(),
        name: or_not_specified(vacancy.name.as_ref()),
        status: status.to_string(),
        vacancy_url: or_not_specified(vacancy.alternate_url.as_ref()),
        social_protected: SOCIAL_PROTECTED.to_string(),
        vacancy_source: VacancySource::Hh.tag().to_string(),
        description,
        employer_location: hh_employer_location(vacancy, ""),
        salary: hh_salary(vacancy),
        employer_name: or_not_specified(
            vacancy.employer.as_ref().and_then(|e| e.name.as_ref()),
        ),
        employer_code: or_not_specified(employer_code),
        employer_phone,
        employer_email,
        contact_person: DEFAULT_NOT_SPECIFIED.to_string(),
        employment: or_not_specified(vacancy.employment.as_ref().and_then(|e| e.name.as_ref())),
    })
}

pub fn parse_tv_details(vacancy: &TvVacancy) -> Result<VacancyDetails> {
    let employer_code = vacancy.company.as_ref().and_then(|c| c.companycode.as_ref());
    let vacancy_id = vacancy.id.as_ref().ok_or_else(|| {
        parse_error(
            VacancySource::Trudvsem,
            vacancy.id.as_ref(),
            employer_code,
            "vacancy details are missing the identifier",
        )
    })?;

    Ok(VacancyDetails {
        vacancy_id: vacancy_id.clone(),
        name: or_not_specified(vacancy.job_name.as_ref()),
        status: STATUS_ACTUAL.to_string(),
        vacancy_url: or_not_specified(vacancy.vac_url.as_ref()),
        social_protected: or_not_specified(vacancy.social_protected.as_ref()),
        vacancy_source: VacancySource::Trudvsem.tag().to_string(),
        description: tv_description(vacancy),
        employer_location: tv_employer_location(vacancy),
        salary: tv_salary(vacancy),
        employer_name: or_not_specified(vacancy.company.as_ref().and_then(|c| c.name.as_ref())),
        employer_code: or_not_specified(employer_code),
        employer_phone: tv_contact(vacancy, TV_CONTACT_PHONE, DEFAULT_PHONE),
        employer_email: tv_contact(vacancy, TV_CONTACT_EMAIL, DEFAULT_EMAIL),
        contact_person: or_not_specified(vacancy.contact_person.as_ref()),
        employment: or_not_specified(vacancy.employment.as_ref()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::raw::{
        HhAddress, HhContacts, HhEmployer, HhNamed, HhPhone, HhSalary, HhSnippet, TvAddress,
        TvAddresses, TvCompany, TvContact,
    };

    fn hh_vacancy(id: &str) -> HhVacancy {
        HhVacancy {
            id: Some(id.to_string()),
            name: Some("Программист".to_string()),
            alternate_url: Some("https://hh.ru/vacancy/1".to_string()),
            ..Default::default()
        }
    }

    fn tv_envelope(id: &str) -> TvVacancyEnvelope {
        TvVacancyEnvelope {
            vacancy: TvVacancy {
                id: Some(id.to_string()),
                job_name: Some("Оператор".to_string()),
                vac_url: Some("https://trudvsem.ru/vacancy/1".to_string()),
                company: Some(TvCompany {
                    companycode: Some("1832000000".to_string()),
                    name: Some("Завод".to_string()),
                }),
                ..Default::default()
            },
        }
    }

    #[test]
    fn hh_salary_has_four_textual_forms() {
        let mut vacancy = hh_vacancy("1");

        vacancy.salary = Some(HhSalary {
            from: Some(50000),
            to: Some(70000),
            currency: None,
        });
        assert_eq!(hh_salary(&vacancy), "от 50000 до 70000");

        vacancy.salary = Some(HhSalary {
            from: Some(50000),
            to: None,
            currency: None,
        });
        assert_eq!(hh_salary(&vacancy), "от 50000");

        vacancy.salary = Some(HhSalary {
            from: None,
            to: Some(70000),
            currency: None,
        });
        assert_eq!(hh_salary(&vacancy), "до 70000");

        vacancy.salary = None;
        assert_eq!(hh_salary(&vacancy), DEFAULT_SALARY);
    }

    #[test]
    fn strip_html_removes_tags_and_nbsp() {
        let raw = "<p>Обязанности:</p><ul><li>работа&nbsp;с клиентами</li></ul>";
        assert_eq!(strip_html(raw), "Обязанности:работас клиентами");
        let multiline = "<div>перв\nая</div> строка";
        assert_eq!(strip_html(multiline), "перв\nая строка");
    }

    #[test]
    fn hh_listing_maps_placeholders_for_missing_fields() {
        let vacancy = hh_vacancy("101");
        let parsed = parse_hh_listing(&[vacancy], "Москва").unwrap();
        let item = &parsed[0];
        assert_eq!(item.vacancy_id, "101");
        assert_eq!(item.location, "Москва");
        assert_eq!(item.salary, DEFAULT_SALARY);
        assert_eq!(item.employer_phone, DEFAULT_PHONE);
        assert_eq!(item.employer_name, DEFAULT_NOT_SPECIFIED);
        assert_eq!(item.category, DEFAULT_NOT_SPECIFIED);
        assert_eq!(item.vacancy_source, "hh");
        // no address and no area: fall back to the searched locality
        assert_eq!(item.employer_location, "Москва");
    }

    #[test]
    fn hh_listing_builds_description_from_snippet() {
        let mut vacancy = hh_vacancy("102");
        vacancy.snippet = Some(HhSnippet {
            responsibility: Some("Писать код.".to_string()),
            requirement: Some("Опыт от года.".to_string()),
        });
        let parsed = parse_hh_listing(&[vacancy], "Москва").unwrap();
        assert_eq!(
            parsed[0].description,
            "Писать код.\n\nТребования: Опыт от года."
        );
    }

    #[test]
    fn hh_listing_cleans_employer_name() {
        let mut vacancy = hh_vacancy("103");
        vacancy.employer = Some(HhEmployer {
            id: Some("77".to_string()),
            name: Some("(Job developmentРога и копыта)".to_string()),
        });
        let parsed = parse_hh_listing(&[vacancy], "Москва").unwrap();
        assert_eq!(parsed[0].employer_name, "Рога и копыта");
        assert_eq!(parsed[0].employer_code, "77");
    }

    #[test]
    fn hh_listing_prefers_raw_address() {
        let mut vacancy = hh_vacancy("104");
        vacancy.address = Some(HhAddress {
            raw: Some("Москва, Ленина 1".to_string()),
        });
        vacancy.area = Some(crate::models::raw::HhArea {
            name: Some("Москва".to_string()),
        });
        let parsed = parse_hh_listing(&[vacancy], "Тверь").unwrap();
        assert_eq!(parsed[0].employer_location, "Москва, Ленина 1");
    }

    #[test]
    fn hh_listing_empty_address_does_not_fall_through_to_area() {
        let mut vacancy = hh_vacancy("106");
        vacancy.address = Some(HhAddress { raw: None });
        vacancy.area = Some(crate::models::raw::HhArea {
            name: Some("Москва".to_string()),
        });
        let parsed = parse_hh_listing(&[vacancy], "Тверь").unwrap();
        assert_eq!(parsed[0].employer_location, DEFAULT_NOT_SPECIFIED);
    }

    #[test]
    fn hh_listing_without_id_is_a_parse_failure() {
        let vacancy = HhVacancy::default();
        let error = parse_hh_listing(&[vacancy], "Москва").unwrap_err();
        assert!(matches!(
            error,
            Error::Parse {
                vendor: VacancySource::Hh,
                ..
            }
        ));
    }

    #[test]
    fn tv_listing_takes_first_address() {
        let mut envelope = tv_envelope("201");
        envelope.vacancy.addresses = Some(TvAddresses {
            address: vec![
                TvAddress {
                    location: Some("Ижевск, Советская 5".to_string()),
                },
                TvAddress {
                    location: Some("Ижевск, Мира 2".to_string()),
                },
            ],
        });
        let parsed = parse_tv_listing(&[envelope], "Ижевск").unwrap();
        assert_eq!(parsed[0].employer_location, "Ижевск, Советская 5");
    }

    #[test]
    fn tv_listing_reads_contacts_by_type() {
        let mut envelope = tv_envelope("202");
        envelope.vacancy.contact_list = vec![
            TvContact {
                contact_type: Some("Эл. почта".to_string()),
                contact_value: Some("hr@zavod.ru".to_string()),
            },
            TvContact {
                contact_type: Some("Телефон".to_string()),
                contact_value: Some("+7 (3412) 00-00-00".to_string()),
            },
        ];
        let parsed = parse_tv_listing(&[envelope], "Ижевск").unwrap();
        assert_eq!(parsed[0].employer_phone, "+7 (3412) 00-00-00");
    }

    #[test]
    fn tv_listing_strips_duty_markup() {
        let mut envelope = tv_envelope("203");
        envelope.vacancy.duty = Some("<b>Сборка</b>&nbsp;узлов".to_string());
        let parsed = parse_tv_listing(&[envelope], "Ижевск").unwrap();
        assert_eq!(parsed[0].description, "Сборкаузлов");
    }

    #[test]
    fn tv_listing_defaults_missing_duty() {
        let envelope = tv_envelope("204");
        let parsed = parse_tv_listing(&[envelope], "Ижевск").unwrap();
        assert_eq!(parsed[0].description, DEFAULT_DUTY);
        assert_eq!(parsed[0].vacancy_source, "trudvsem");
    }

    #[test]
    fn hh_details_reports_archival_status() {
        let mut vacancy = hh_vacancy("105");
        vacancy.archived = Some(true);
        vacancy.description = Some("<p>Описание</p>".to_string());
        vacancy.contacts = Some(HhContacts {
            email: Some("hire@corp.ru".to_string()),
            phones: vec![HhPhone {
                formatted: None,
                number: Some("+79990000000".to_string()),
            }],
        });
        vacancy.employment = Some(HhNamed {
            name: Some("Полная занятость".to_string()),
        });

        let details = parse_hh_details(&vacancy).unwrap();
        assert_eq!(details.status, STATUS_ARCHIVAL);
        assert_eq!(details.description, "Описание");
        assert_eq!(details.employer_email, "hire@corp.ru");
        assert_eq!(details.employer_phone, "+79990000000");
        assert_eq!(details.contact_person, DEFAULT_NOT_SPECIFIED);
        assert_eq!(details.employment, "Полная занятость");
        assert_eq!(details.social_protected, SOCIAL_PROTECTED);
    }

    #[test]
    fn tv_details_carries_contact_person_and_email() {
        let mut envelope = tv_envelope("205");
        envelope.vacancy.contact_person = Some("Иванова И.И.".to_string());
        envelope.vacancy.contact_list = vec![TvContact {
            contact_type: Some("Эл. почта".to_string()),
            contact_value: Some("hr@zavod.ru".to_string()),
        }];
        let details = parse_tv_details(&envelope.vacancy).unwrap();
        assert_eq!(details.status, STATUS_ACTUAL);
        assert_eq!(details.contact_person, "Иванова И.И.");
        assert_eq!(details.employer_email, "hr@zavod.ru");
        assert_eq!(details.employer_phone, DEFAULT_PHONE);
    }
}
