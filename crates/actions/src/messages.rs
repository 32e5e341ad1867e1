use rust_decimal::Decimal;

use ounibot_core::admission::AdmissionOutlook;
use ounibot_core::domain::program::{Program, ProgramSummary, KNOWN_PROGRAM_CODES};
use ounibot_core::domain::syllabus::SyllabusLink;

/// Domain template shown when no information entry matches.
pub const INFO_FALLBACK_TEMPLATE: &str = "utter_info_enspd";

/// Joins paragraphs with a blank line between them.
#[derive(Default)]
pub struct MessageBuilder {
    paragraphs: Vec<String>,
}

impl MessageBuilder {
    pub fn new(header: impl Into<String>) -> Self {
        Self { paragraphs: vec![header.into()] }
    }

    pub fn paragraph(mut self, text: impl Into<String>) -> Self {
        self.paragraphs.push(text.into());
        self
    }

    pub fn lines<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let lines: Vec<String> = lines.into_iter().map(Into::into).collect();
        self.paragraphs.push(lines.join("\n"));
        self
    }

    pub fn build(self) -> String {
        self.paragraphs.join("\n\n")
    }
}

fn known_codes() -> String {
    KNOWN_PROGRAM_CODES.join(", ")
}

pub fn ask_program() -> String {
    format!("De quelle filière voulez-vous des informations ? ({})", known_codes())
}

pub fn program_details(program: &Program) -> String {
    MessageBuilder::new(format!("🎓 **{} ({})**", program.name, program.code.as_str()))
        .lines([
            format!("🏛️ **Département**: {}", program.department),
            format!("⏱️ **Durée**: {} ans", program.duration_years),
            format!("👥 **Places disponibles**: {}", program.seats),
            format!("💰 **Frais annuels**: {} FCFA", format_fee(program.annual_fee)),
            format!("👨‍🏫 **Chef de département**: {}", program.department_head),
        ])
        .paragraph(format!("📖 **Description**:\n{}", program.description))
        .paragraph("Voulez-vous consulter le syllabus détaillé ?")
        .build()
}

pub fn program_not_found(query: &str) -> String {
    format!(
        "Désolé, je n'ai pas trouvé d'informations sur '{query}'. Les filières disponibles sont: {}.",
        known_codes()
    )
}

pub fn ask_syllabus_program() -> &'static str {
    "Pour quelle filière souhaitez-vous le syllabus ?"
}

pub fn syllabus_details(link: &SyllabusLink) -> String {
    MessageBuilder::new(format!("📚 **Syllabus {}**", link.program_name))
        .lines([
            "Vous pouvez consulter le syllabus détaillé via ce lien:".to_owned(),
            format!("🔗 {}", link.url),
        ])
        .lines([
            "Le document contient:",
            "• Programme détaillé par semestre",
            "• Liste des matières et crédits",
            "• Objectifs pédagogiques",
            "• Modalités d'évaluation",
        ])
        .build()
}

pub fn syllabus_unavailable(code: &str) -> String {
    format!(
        "Le syllabus pour '{code}' n'est pas encore disponible. Contactez le service de scolarité pour plus d'informations."
    )
}

pub fn ask_rank() -> &'static str {
    "Quel est votre rang au concours ?"
}

pub fn invalid_rank() -> &'static str {
    "Veuillez indiquer un rang valide (nombre)."
}

pub fn admission_evaluation(
    rank: i64,
    outlook: AdmissionOutlook,
    program_name: Option<&str>,
) -> String {
    let mut message = MessageBuilder::new(format!("🎯 **Évaluation pour le rang {rank}**"))
        .paragraph(format!("📊 Chances d'admission: **{}**", outlook.summary()));
    if let Some(name) = program_name {
        message = message.paragraph(format!("📚 Filière visée: {name}"));
    }
    message
        .paragraph(format!("💡 **Conseil**: {}", outlook.advice()))
        .paragraph(
            "Pour plus d'informations, consultez les statistiques détaillées sur notre site web.",
        )
        .build()
}

pub fn program_listing(programs: &[ProgramSummary]) -> String {
    let mut message = MessageBuilder::new("🎓 **Filières de l'ENSPD**");
    for (index, program) in programs.iter().enumerate() {
        message = message.lines([
            format!("{}\u{fe0f}\u{20e3} **{} ({})**", index + 1, program.name, program.code.as_str()),
            format!("   📊 Places: {}", program.seats),
        ]);
    }
    message
        .paragraph("\nPour plus d'informations sur une filière, demandez: 'Parle-moi de GI'")
        .build()
}

pub fn no_programs() -> &'static str {
    "Aucune filière trouvée."
}

pub fn fallback_help() -> String {
    MessageBuilder::new("Désolé, je n'ai pas bien compris votre demande. 😕")
        .lines([
            "Je peux vous aider avec:",
            "• Informations sur les filières",
            "• Conditions d'admission",
            "• Concours d'entrée",
            "• Bourses et logement",
            "• Contact de l'école",
        ])
        .paragraph("Tapez 'aide' pour voir toutes mes fonctionnalités.")
        .build()
}

pub fn hello_world() -> &'static str {
    "Hello World from OUNIBOT!"
}

pub fn which_program() -> &'static str {
    "De quelle filière voulez-vous des informations ?"
}

/// Groups the integer part by thousands with `,`, e.g. `1,250,000`.
pub fn format_fee(fee: Decimal) -> String {
    let rendered = fee.normalize().to_string();
    let (sign, unsigned) = match rendered.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", rendered.as_str()),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (index, digit) in integer.chars().enumerate() {
        if index > 0 && (integer.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    match fraction {
        Some(fraction) => format!("{sign}{grouped}.{fraction}"),
        None => format!("{sign}{grouped}"),
    }
}
