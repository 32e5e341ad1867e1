use std::sync::Arc;

use rust_decimal::Decimal;
use serde_json::json;

use ounibot_actions::handlers::{
    ADMISSION_CHANCES_ACTION, FALLBACK_ACTION, GENERAL_INFO_ACTION, PROGRAM_INFO_ACTION,
    PROGRAM_LISTING_ACTION, SYLLABUS_ACTION,
};
use ounibot_actions::messages;
use ounibot_actions::{
    default_registry, ActionContext, ActionRegistry, ActionRequest, ActionResponse,
};
use ounibot_core::domain::information::{InfoCategory, InformationEntry};
use ounibot_core::domain::program::{Program, ProgramCode, KNOWN_PROGRAM_CODES};
use ounibot_db::InMemoryCatalogStore;

const SERVICE_UNAVAILABLE: &str =
    "Désolé, le service d'information est momentanément indisponible. Veuillez réessayer dans quelques instants.";

fn program(code: &str, name: &str, seats: u32) -> Program {
    Program {
        code: ProgramCode(code.to_owned()),
        name: name.to_owned(),
        department: format!("Département {code}"),
        duration_years: 5,
        description: format!("Formation d'ingénieurs en {name}."),
        seats,
        department_head: format!("Chef {code}"),
        annual_fee: Decimal::from(350_000),
    }
}

fn info(category: InfoCategory, topic: &str, content: &str) -> InformationEntry {
    InformationEntry { category, topic: Some(topic.to_owned()), content: content.to_owned() }
}

fn catalog() -> InMemoryCatalogStore {
    let mut store = InMemoryCatalogStore::new()
        .with_program(program("GI", "Génie Informatique", 60))
        .with_program(program("GC", "Génie Civil", 80))
        .with_program(program("GE", "Génie Électrique", 70))
        .with_program(program("GMP", "Génie Mécanique et Productique", 60))
        .with_program(program("GT", "Génie des Télécommunications", 40))
        .with_program(program("GIND", "Génie Industriel", 50));
    for code in ["GI", "GC", "GE", "GMP", "GIND"] {
        store = store.with_syllabus(code, &format!("https://enspd.example/syllabus/{code}.pdf"));
    }
    store
        .with_information(info(InfoCategory::General, "Présentation ENSPD", "PRESENTATION"))
        .with_information(info(InfoCategory::General, "Contact", "CONTACT"))
        .with_information(info(InfoCategory::Admission, "Conditions d'admission", "ADMISSION"))
        .with_information(info(InfoCategory::EntranceExam, "Concours d'entrée", "CONCOURS"))
        .with_information(info(InfoCategory::StudentLife, "Bourses", "BOURSES"))
        .with_information(info(InfoCategory::StudentLife, "Logement", "LOGEMENT"))
}

fn registry(store: &InMemoryCatalogStore) -> ActionRegistry {
    default_registry(Arc::new(store.clone()))
}

async fn run(store: &InMemoryCatalogStore, request: ActionRequest) -> ActionResponse {
    let ctx = ActionContext::for_request(&request);
    registry(store).dispatch(&request, &ctx).await
}

fn only_text(response: &ActionResponse) -> &str {
    let texts = response.texts();
    assert_eq!(texts.len(), 1, "expected exactly one text message: {response:?}");
    texts[0]
}

fn assert_sessions_balanced(store: &InMemoryCatalogStore) {
    assert_eq!(store.sessions_opened(), store.sessions_closed());
}

#[tokio::test]
async fn every_known_code_resolves_with_slot_event() {
    let store = catalog();

    for code in KNOWN_PROGRAM_CODES {
        let request = ActionRequest::new(PROGRAM_INFO_ACTION)
            .with_sender("conv-1")
            .with_entity("filiere", code.to_lowercase());
        let response = run(&store, request).await;

        let text = only_text(&response);
        let (name, seats) = match code {
            "GI" => ("Génie Informatique", 60),
            "GC" => ("Génie Civil", 80),
            "GE" => ("Génie Électrique", 70),
            "GMP" => ("Génie Mécanique et Productique", 60),
            "GT" => ("Génie des Télécommunications", 40),
            _ => ("Génie Industriel", 50),
        };
        assert!(text.starts_with(&format!("🎓 **{name} ({code})**")), "{code}: {text}");
        assert!(text.contains(&format!("👥 **Places disponibles**: {seats}")));
        assert!(text.contains(&format!("📖 **Description**:\nFormation d'ingénieurs en {name}.")));
        assert!(text.contains(&format!("Département {code}")));
        assert!(text.contains("5 ans"));
        assert!(text.contains("350,000 FCFA"));
        assert!(text.contains(&format!("Chef {code}")));
        assert!(text.ends_with("Voulez-vous consulter le syllabus détaillé ?"));
        assert_eq!(response.events.len(), 1);
        assert_eq!(response.slot_value("filiere"), Some(&json!(code)));
    }
    assert_sessions_balanced(&store);
}

#[tokio::test]
async fn unknown_code_lists_known_programs_without_events() {
    let store = catalog();

    let response =
        run(&store, ActionRequest::new(PROGRAM_INFO_ACTION).with_entity("filiere", "ZZ")).await;

    assert_eq!(only_text(&response), messages::program_not_found("ZZ"));
    assert!(only_text(&response).contains("GI, GC, GE, GMP, GT, GIND"));
    assert!(response.events.is_empty());
    assert_eq!(store.sessions_opened(), 1);
    assert_sessions_balanced(&store);
}

#[tokio::test]
async fn name_fragment_resolves_when_no_code_matches() {
    let store = catalog();

    let response = run(
        &store,
        ActionRequest::new(PROGRAM_INFO_ACTION).with_entity("filiere", "ÉLECTRIQUE"),
    )
    .await;

    assert_eq!(response.slot_value("filiere"), Some(&json!("GE")));
}

#[tokio::test]
async fn exact_code_beats_earlier_name_match() {
    let store = InMemoryCatalogStore::new()
        .with_program(program("AA", "Programme GT avancé", 10))
        .with_program(program("GT", "Génie des Télécommunications", 40));

    let response =
        run(&store, ActionRequest::new(PROGRAM_INFO_ACTION).with_entity("filiere", "gt")).await;

    assert_eq!(response.slot_value("filiere"), Some(&json!("GT")));
}

#[tokio::test]
async fn missing_program_asks_without_opening_a_session() {
    let store = catalog();

    let response = run(&store, ActionRequest::new(PROGRAM_INFO_ACTION)).await;

    assert_eq!(only_text(&response), messages::ask_program());
    assert!(response.events.is_empty());
    assert_eq!(store.sessions_opened(), 0);
}

#[tokio::test]
async fn syllabus_prefers_slot_over_entity() {
    let store = catalog();

    let response = run(
        &store,
        ActionRequest::new(SYLLABUS_ACTION).with_slot("filiere", "GC").with_entity("filiere", "GI"),
    )
    .await;

    let text = only_text(&response);
    assert!(text.starts_with("📚 **Syllabus Génie Civil**"));
    assert!(text.contains("🔗 https://enspd.example/syllabus/GC.pdf"));
    assert!(text.contains("• Modalités d'évaluation"));
    assert!(response.events.is_empty());
    assert_sessions_balanced(&store);
}

#[tokio::test]
async fn syllabus_uses_entity_when_slot_is_empty() {
    let store = catalog();

    let response = run(
        &store,
        ActionRequest::new(SYLLABUS_ACTION)
            .with_slot("filiere", serde_json::Value::Null)
            .with_entity("filiere", "gi"),
    )
    .await;

    assert!(only_text(&response).contains("GI.pdf"));
}

#[tokio::test]
async fn syllabus_missing_link_points_to_registrar() {
    let store = catalog();

    let response =
        run(&store, ActionRequest::new(SYLLABUS_ACTION).with_slot("filiere", "GT")).await;

    assert_eq!(only_text(&response), messages::syllabus_unavailable("GT"));
    assert_sessions_balanced(&store);
}

#[tokio::test]
async fn syllabus_without_program_asks() {
    let store = catalog();

    let response = run(&store, ActionRequest::new(SYLLABUS_ACTION)).await;

    assert_eq!(only_text(&response), messages::ask_syllabus_program());
    assert_eq!(store.sessions_opened(), 0);
}

#[tokio::test]
async fn general_information_follows_keyword_priority() {
    let store = catalog();
    let cases = [
        ("Quelle est l'adresse pour l'admission ?", "ADMISSION"),
        ("Comment intégrer l'école ?", "ADMISSION"),
        ("Quelles sont les épreuves du concours ?", "CONCOURS"),
        ("Y a-t-il une aide financière ?", "BOURSES"),
        ("Je cherche une chambre à la cité", "LOGEMENT"),
        ("Quel est votre numéro de TÉLÉPHONE ?", "CONTACT"),
        ("Bonjour", "PRESENTATION"),
        ("", "PRESENTATION"),
    ];

    for (message, expected) in cases {
        let response =
            run(&store, ActionRequest::new(GENERAL_INFO_ACTION).with_text(message)).await;
        assert_eq!(only_text(&response), expected, "message: {message}");
        assert!(response.events.is_empty());
    }
    assert_sessions_balanced(&store);
}

#[tokio::test]
async fn missing_information_falls_back_to_domain_template() {
    let store = InMemoryCatalogStore::new();

    let response =
        run(&store, ActionRequest::new(GENERAL_INFO_ACTION).with_text("logement")).await;

    assert!(response.texts().is_empty());
    assert_eq!(response.responses.len(), 1);
    assert_eq!(response.responses[0].response.as_deref(), Some(messages::INFO_FALLBACK_TEMPLATE));
    assert_sessions_balanced(&store);
}

#[tokio::test]
async fn admission_rank_boundaries() {
    let store = catalog();
    let cases = [
        (1, "excellentes (95%)"),
        (200, "excellentes (95%)"),
        (201, "très bonnes (80%)"),
        (500, "très bonnes (80%)"),
        (501, "moyennes (50%)"),
        (1000, "moyennes (50%)"),
        (1001, "limitées (30%)"),
        (1500, "limitées (30%)"),
        (1501, "faibles (15%)"),
    ];

    for (rank, expected) in cases {
        let response = run(
            &store,
            ActionRequest::new(ADMISSION_CHANCES_ACTION).with_entity("rang", rank.to_string()),
        )
        .await;
        let text = only_text(&response);
        assert!(text.contains(&format!("rang {rank}**")), "{rank}: {text}");
        assert!(text.contains(expected), "{rank}: {text}");
        assert!(response.events.is_empty());
    }
    assert_eq!(store.sessions_opened(), 0);
}

#[tokio::test]
async fn admission_accepts_numeric_entity_and_names_program() {
    let store = catalog();

    let response = run(
        &store,
        ActionRequest::new(ADMISSION_CHANCES_ACTION)
            .with_entity("rang", 350)
            .with_entity("filiere", "gi"),
    )
    .await;

    let text = only_text(&response);
    assert!(text.contains("très bonnes (80%)"));
    assert!(text.contains("📚 Filière visée: Génie Informatique"));
    assert!(response.events.is_empty());
    assert_eq!(store.sessions_opened(), 1);
    assert_sessions_balanced(&store);
}

#[tokio::test]
async fn admission_omits_unresolved_program() {
    let store = catalog();

    let response = run(
        &store,
        ActionRequest::new(ADMISSION_CHANCES_ACTION)
            .with_entity("rang", " 750 ")
            .with_entity("filiere", "ZZ"),
    )
    .await;

    let text = only_text(&response);
    assert!(text.contains("moyennes (50%)"));
    assert!(!text.contains("Filière visée"));
    assert_sessions_balanced(&store);
}

#[tokio::test]
async fn admission_rejects_non_integer_rank_with_or_without_program() {
    let store = catalog();

    for request in [
        ActionRequest::new(ADMISSION_CHANCES_ACTION).with_entity("rang", "abc"),
        ActionRequest::new(ADMISSION_CHANCES_ACTION)
            .with_entity("rang", "abc")
            .with_entity("filiere", "GI"),
        ActionRequest::new(ADMISSION_CHANCES_ACTION).with_entity("rang", "12.5"),
    ] {
        let response = run(&store, request).await;
        assert_eq!(only_text(&response), messages::invalid_rank());
        assert!(response.events.is_empty());
    }
    assert_eq!(store.sessions_opened(), 0);
}

#[tokio::test]
async fn admission_rank_beyond_i64_lands_in_lowest_bucket() {
    let store = catalog();

    let response = run(
        &store,
        ActionRequest::new(ADMISSION_CHANCES_ACTION).with_entity("rang", "99999999999999999999"),
    )
    .await;

    let text = only_text(&response);
    assert_ne!(text, messages::invalid_rank());
    assert!(text.contains("faibles (15%)"), "{text}");
    assert!(response.events.is_empty());
}

#[tokio::test]
async fn admission_numeric_zero_rank_asks_again() {
    let store = catalog();

    let numeric = run(&store, ActionRequest::new(ADMISSION_CHANCES_ACTION).with_entity("rang", 0))
        .await;
    let text_zero =
        run(&store, ActionRequest::new(ADMISSION_CHANCES_ACTION).with_entity("rang", "0")).await;

    assert_eq!(only_text(&numeric), messages::ask_rank());
    assert!(only_text(&text_zero).contains("excellentes (95%)"));
    assert_eq!(store.sessions_opened(), 0);
}

#[tokio::test]
async fn admission_without_rank_asks() {
    let store = catalog();

    let response = run(
        &store,
        ActionRequest::new(ADMISSION_CHANCES_ACTION).with_entity("filiere", "GI"),
    )
    .await;

    assert_eq!(only_text(&response), messages::ask_rank());
    assert_eq!(store.sessions_opened(), 0);
}

#[tokio::test]
async fn listing_is_ordered_and_numbered() {
    let store = catalog();

    let response = run(&store, ActionRequest::new(PROGRAM_LISTING_ACTION)).await;

    let text = only_text(&response);
    let expected = ["GC", "GE", "GI", "GIND", "GMP", "GT"];
    let mut last_position = 0;
    for (index, code) in expected.iter().enumerate() {
        let marker = format!("{}\u{fe0f}\u{20e3} **", index + 1);
        let position = text.find(&marker).unwrap_or_else(|| panic!("missing entry {}", index + 1));
        assert!(text[position..].contains(&format!("({code})**")));
        assert!(position >= last_position);
        last_position = position;
    }
    assert!(!text.contains("7\u{fe0f}\u{20e3}"));
    assert!(text.contains("'Parle-moi de GI'"));
    assert_sessions_balanced(&store);
}

#[tokio::test]
async fn listing_empty_catalog() {
    let store = InMemoryCatalogStore::new();

    let response = run(&store, ActionRequest::new(PROGRAM_LISTING_ACTION)).await;

    assert_eq!(only_text(&response), "Aucune filière trouvée.");
    assert_sessions_balanced(&store);
}

#[tokio::test]
async fn unknown_action_is_served_by_fallback() {
    let store = catalog();

    let fallback = run(&store, ActionRequest::new(FALLBACK_ACTION).with_text("xyz")).await;
    let unknown = run(&store, ActionRequest::new("action_inexistante")).await;

    assert_eq!(only_text(&fallback), messages::fallback_help());
    assert_eq!(unknown, fallback);
    assert_eq!(store.sessions_opened(), 0);
}

#[tokio::test]
async fn legacy_actions_reply_with_fixed_text() {
    let store = catalog();

    let hello = run(&store, ActionRequest::new("action_hello_world")).await;
    let which = run(&store, ActionRequest::new("action_which_program")).await;

    assert_eq!(only_text(&hello), "Hello World from OUNIBOT!");
    assert_eq!(only_text(&which), "De quelle filière voulez-vous des informations ?");
}

#[tokio::test]
async fn identical_requests_yield_identical_responses() {
    let store = catalog();
    let requests = [
        ActionRequest::new(PROGRAM_INFO_ACTION).with_entity("filiere", "GMP"),
        ActionRequest::new(SYLLABUS_ACTION).with_entity("filiere", "GE"),
        ActionRequest::new(GENERAL_INFO_ACTION).with_text("concours"),
        ActionRequest::new(ADMISSION_CHANCES_ACTION).with_entity("rang", "1200"),
        ActionRequest::new(PROGRAM_LISTING_ACTION),
    ];

    for request in requests {
        let first = run(&store, request.clone()).await;
        let second = run(&store, request).await;
        assert_eq!(first, second);
    }
}

#[tokio::test]
async fn query_failures_release_sessions_and_return_generic_message() {
    let store = catalog().failing_queries();
    let requests = [
        ActionRequest::new(PROGRAM_INFO_ACTION).with_entity("filiere", "GI"),
        ActionRequest::new(SYLLABUS_ACTION).with_slot("filiere", "GI"),
        ActionRequest::new(GENERAL_INFO_ACTION).with_text("bourse"),
        ActionRequest::new(ADMISSION_CHANCES_ACTION)
            .with_entity("rang", "100")
            .with_entity("filiere", "GI"),
        ActionRequest::new(PROGRAM_LISTING_ACTION),
    ];
    let request_count = requests.len();

    for request in requests {
        let response = run(&store, request).await;
        assert_eq!(only_text(&response), SERVICE_UNAVAILABLE);
        assert!(response.events.is_empty());
    }
    assert_eq!(store.sessions_opened(), request_count);
    assert_sessions_balanced(&store);
}

#[tokio::test]
async fn unavailable_store_returns_generic_message() {
    let store = catalog().unavailable();

    let response =
        run(&store, ActionRequest::new(PROGRAM_LISTING_ACTION).with_sender("conv-9")).await;

    assert_eq!(only_text(&response), SERVICE_UNAVAILABLE);
    assert!(response.events.is_empty());
    assert_eq!(store.sessions_opened(), 0);
    assert_eq!(store.sessions_closed(), 0);
}

#[tokio::test]
async fn registry_lists_every_action_sorted() {
    let registry = registry(&catalog());

    assert_eq!(
        registry.identifiers(),
        vec![
            "action_chances_admission",
            "action_default_fallback",
            "action_demande_syllabus",
            "action_hello_world",
            "action_info_filiere",
            "action_info_generale",
            "action_liste_filieres",
            "action_which_program",
        ]
    );
    assert_eq!(registry.handler_count(), 8);
    assert!(registry.contains("action_info_filiere"));
}
