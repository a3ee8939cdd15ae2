//! Print rendering: date labels and the self-contained printable HTML
//! document the shell opens in a print window.

use chrono::{Datelike, NaiveDate};

use crate::models::cv::{Document, Experience, SkillCategory};

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Fev", "Mar", "Abr", "Mai", "Jun", "Jul", "Ago", "Set", "Out", "Nov", "Dez",
];

const PRINT_STYLE: &str = r#"* { margin: 0; padding: 0; box-sizing: border-box; }
body { font-family: Arial, sans-serif; line-height: 1.6; color: #333; }
.container { max-width: 800px; margin: 0 auto; padding: 20px; }
h1 { font-size: 28px; margin-bottom: 10px; text-align: center; }
h2 { font-size: 18px; margin: 20px 0 10px 0; text-transform: uppercase; font-weight: bold; border-bottom: 2px solid #e5e7eb; padding-bottom: 5px; }
h3 { font-size: 16px; margin: 10px 0 5px 0; font-weight: 600; }
p { margin: 5px 0; }
ul { margin: 10px 0; padding-left: 20px; }
li { margin: 5px 0; }
.header { text-align: center; margin-bottom: 30px; padding-bottom: 20px; border-bottom: 2px solid #e5e7eb; }
.contact-info { display: flex; flex-wrap: wrap; justify-content: center; gap: 15px; margin-top: 10px; font-size: 14px; }
.section { margin-bottom: 25px; }
.experience-item, .education-item { margin-bottom: 20px; padding-left: 15px; border-left: 2px solid #e5e7eb; }
.date { font-size: 14px; color: #666; }
.skills { line-height: 1.8; }
@media print {
  body { font-size: 12px; }
  .container { padding: 0; }
}"#;

/// Formats a `YYYY-MM` month input value as an abbreviated label, e.g.
/// `"2023-05"` becomes `"Mai 2023"`. Anything unparseable is returned
/// verbatim instead of producing a broken label.
pub fn month_label(date: &str) -> String {
    if date.is_empty() {
        return String::new();
    }
    match NaiveDate::parse_from_str(&format!("{date}-01"), "%Y-%m-%d") {
        Ok(parsed) => format!("{} {}", MONTH_LABELS[parsed.month0() as usize], parsed.year()),
        Err(_) => date.to_string(),
    }
}

/// `"Mar 2021 - Presente"` for current positions, otherwise start and end
/// labels joined with a dash.
pub fn period_label(exp: &Experience) -> String {
    let end = if exp.current {
        "Presente".to_string()
    } else {
        month_label(&exp.end_date)
    };
    format!("{} - {}", month_label(&exp.start_date), end)
}

/// Assembles the printable HTML document. Sections without content are
/// omitted entirely; blank list items are skipped and a leading bullet
/// character typed by the user is stripped.
pub fn print_html(doc: &Document) -> String {
    let mut html = String::new();
    html.push_str("<html>\n<head>\n");
    html.push_str(&format!(
        "<title>CV - {}</title>\n",
        escape(&doc.personal_info.full_name)
    ));
    html.push_str("<style>\n");
    html.push_str(PRINT_STYLE);
    html.push_str("\n</style>\n</head>\n<body>\n<div class=\"container\">\n");

    push_header(&mut html, doc);
    push_summary(&mut html, doc);
    push_experience(&mut html, doc);
    push_education(&mut html, doc);
    push_skills(&mut html, doc);

    html.push_str("</div>\n</body>\n</html>\n");
    html
}

fn push_header(html: &mut String, doc: &Document) {
    let info = &doc.personal_info;
    html.push_str("<div class=\"header\">\n");
    let name = if info.full_name.is_empty() {
        "Seu Nome"
    } else {
        &info.full_name
    };
    html.push_str(&format!("<h1>{}</h1>\n", escape(name)));
    html.push_str("<div class=\"contact-info\">\n");
    for value in [
        &info.email,
        &info.phone,
        &info.location,
        &info.linked_in,
        &info.website,
    ] {
        if !value.is_empty() {
            html.push_str(&format!("<span>{}</span>\n", escape(value)));
        }
    }
    html.push_str("</div>\n</div>\n");
}

fn push_summary(html: &mut String, doc: &Document) {
    if doc.summary.is_empty() {
        return;
    }
    html.push_str("<div class=\"section\">\n<h2>Resumo Profissional</h2>\n");
    html.push_str(&format!("<p>{}</p>\n", escape(&doc.summary)));
    html.push_str("</div>\n");
}

fn push_experience(html: &mut String, doc: &Document) {
    if doc.experience.is_empty() {
        return;
    }
    html.push_str("<div class=\"section\">\n<h2>Experiência Profissional</h2>\n");
    for exp in &doc.experience {
        html.push_str("<div class=\"experience-item\">\n");
        html.push_str(&format!("<h3>{}</h3>\n", escape(&exp.job_title)));
        if !exp.company.is_empty() {
            html.push_str(&format!("<p>{}</p>\n", escape(&exp.company)));
        }
        if !exp.location.is_empty() {
            html.push_str(&format!("<p>{}</p>\n", escape(&exp.location)));
        }
        html.push_str(&format!("<p class=\"date\">{}</p>\n", escape(&period_label(exp))));
        if !exp.challenge.is_empty() {
            html.push_str("<h4>Desafio:</h4>\n");
            html.push_str(&format!("<p>{}</p>\n", escape(&exp.challenge)));
        }
        push_item_list(html, "Responsabilidades:", &exp.responsibilities);
        push_item_list(html, "Conquistas:", &exp.achievements);
        if !exp.technologies.is_empty() {
            html.push_str(&format!(
                "<p><strong>Tecnologias:</strong> {}</p>\n",
                escape(&exp.technologies.join(", "))
            ));
        }
        html.push_str("</div>\n");
    }
    html.push_str("</div>\n");
}

fn push_item_list(html: &mut String, title: &str, items: &[String]) {
    let filled: Vec<&String> = items.iter().filter(|i| !i.trim().is_empty()).collect();
    if filled.is_empty() {
        return;
    }
    html.push_str(&format!("<h4>{title}</h4>\n<ul>\n"));
    for item in filled {
        html.push_str(&format!("<li>{}</li>\n", escape(clean_bullet(item))));
    }
    html.push_str("</ul>\n");
}

fn push_education(html: &mut String, doc: &Document) {
    if doc.education.is_empty() {
        return;
    }
    html.push_str("<div class=\"section\">\n<h2>Educação</h2>\n");
    for edu in &doc.education {
        html.push_str("<div class=\"education-item\">\n");
        html.push_str(&format!("<h3>{}</h3>\n", escape(&edu.degree)));
        if !edu.institution.is_empty() {
            html.push_str(&format!("<p>{}</p>\n", escape(&edu.institution)));
        }
        if !edu.location.is_empty() {
            html.push_str(&format!("<p>{}</p>\n", escape(&edu.location)));
        }
        if !edu.graduation_date.is_empty() {
            html.push_str(&format!(
                "<p class=\"date\">{}</p>\n",
                escape(&month_label(&edu.graduation_date))
            ));
        }
        if !edu.gpa.is_empty() {
            html.push_str(&format!("<p>GPA: {}</p>\n", escape(&edu.gpa)));
        }
        html.push_str("</div>\n");
    }
    html.push_str("</div>\n");
}

fn push_skills(html: &mut String, doc: &Document) {
    let groups = [
        (SkillCategory::Technical, "Habilidades Técnicas"),
        (SkillCategory::Soft, "Habilidades Comportamentais"),
        (SkillCategory::Language, "Idiomas"),
    ];
    let mut body = String::new();
    for (category, label) in groups {
        let names: Vec<&str> = doc
            .skills
            .iter()
            .filter(|s| s.category == category && !s.name.is_empty())
            .map(|s| s.name.as_str())
            .collect();
        if names.is_empty() {
            continue;
        }
        body.push_str(&format!(
            "<p><strong>{label}:</strong> {}</p>\n",
            escape(&names.join(", "))
        ));
    }
    if body.is_empty() {
        return;
    }
    html.push_str("<div class=\"section\">\n<h2>Habilidades</h2>\n<div class=\"skills\">\n");
    html.push_str(&body);
    html.push_str("</div>\n</div>\n");
}

/// Drops the bullet character users sometimes type at the start of an
/// item; the list markup already provides one.
fn clean_bullet(item: &str) -> &str {
    item.trim().trim_start_matches('•').trim_start()
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
