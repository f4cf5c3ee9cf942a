//! Integration tests for the extraction-substitution pipeline.

use std::io::Write;
use std::path::Path;
use tempfile::{Builder, NamedTempFile};

use peticao::providers::{
    DocumentAssembler, DocxAssembler, DocxTemplate, PlainTextAssembler, PlainTextSource,
    PlainTextTemplate,
};
use peticao::{
    FieldMap, Pipeline, PeticaoError, Step, SupplementaryFields, TemplateProvider,
    WorkflowSession,
};

/// Helper to create a temporary file with given content and suffix.
fn create_test_file(content: &str, suffix: &str) -> NamedTempFile {
    let mut file = Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write to temp file");
    file
}

/// A DOCX template written by the assembler, so the reader sees real
/// WordprocessingML.
fn create_docx_template(paragraphs: &[&str]) -> NamedTempFile {
    let paragraphs: Vec<String> = paragraphs.iter().map(|s| s.to_string()).collect();
    let bytes = DocxAssembler.assemble(&paragraphs).expect("assemble failed");

    let mut file = Builder::new()
        .suffix(".docx")
        .tempfile()
        .expect("Failed to create temp file");
    file.write_all(&bytes).expect("Failed to write to temp file");
    file
}

const HOLERITE: &str = "DEMONSTRATIVO DE PAGAMENTO\n\
    Nome: Maria Silva\n\
    Matrícula: 12345\n\
    Cargo: Auxiliar Administrativo\n\
    Mês/Ano: 05/2024\n\
    Salário Base ............ R$ 3.500,00\n\
    INSS .................... R$ 385,00\n\
    IRRF .................... R$ 215,00\n\
    Valor Líquido: R$ 2.900,00\n";

// =============================================================================
// End-to-end
// =============================================================================

#[test]
fn test_end_to_end_plain_text() {
    let source = create_test_file(HOLERITE, ".txt");
    let template = create_test_file("Eu, [NOME_COMPLETO], recebo [SALARIO_BASE].\n", ".txt");

    let pipeline = Pipeline::new();
    let mut session = WorkflowSession::new();

    let step = pipeline
        .generate(
            &mut session,
            &PlainTextSource,
            source.path(),
            &PlainTextTemplate,
            template.path(),
            &SupplementaryFields::new(),
        )
        .expect("generation failed");

    assert_eq!(step, Step::Review);
    assert_eq!(
        session.generated_paragraphs.as_deref(),
        Some(&["Eu, Maria Silva, recebo R$ 3.500,00.".to_string()][..])
    );
}

#[test]
fn test_end_to_end_docx() {
    let source = create_test_file(HOLERITE, ".txt");
    let template = create_docx_template(&[
        "EXCELENTÍSSIMO SENHOR DOUTOR JUIZ DA VARA DO TRABALHO DE [COMARCA]",
        "",
        "[NOME_COMPLETO], [NACIONALIDADE], [ESTADO_CIVIL], CPF [CPF], vem propor ação em face de [NOME_EMPRESA].",
        "Salário base: [SALARIO_BASE]; INSS: [VALOR_INSS]; IRRF: [VALOR_IRRF]; líquido: [SALARIO_LIQUIDO].",
        "Cargo: [CARGO] desde [DATA_ADMISSAO]. [TESTEMUNHA]",
    ]);

    let pipeline = Pipeline::new();
    let mut session = WorkflowSession::new();
    pipeline
        .generate(
            &mut session,
            &PlainTextSource,
            source.path(),
            &DocxTemplate,
            template.path(),
            &SupplementaryFields::defaults(),
        )
        .expect("generation failed");

    let generated = session.generated_paragraphs.clone().unwrap();
    assert_eq!(generated.len(), 5);
    assert_eq!(
        generated[0],
        "EXCELENTÍSSIMO SENHOR DOUTOR JUIZ DA VARA DO TRABALHO DE SÃO PAULO"
    );
    assert_eq!(generated[1], "");
    assert_eq!(
        generated[2],
        "Maria Silva, brasileiro, casado, CPF 123.456.789-00, vem propor ação em face de Empresa ABC Ltda."
    );
    assert_eq!(
        generated[3],
        "Salário base: R$ 3.500,00; INSS: R$ 385,00; IRRF: R$ 215,00; líquido: R$ 2.900,00."
    );
    assert_eq!(
        generated[4],
        "Cargo: Auxiliar Administrativo desde 01/01/2020. [TESTEMUNHA]"
    );

    // Review: the blank paragraph is not offered for editing
    let reviewable: Vec<usize> = session.reviewable_paragraphs().iter().map(|(i, _)| *i).collect();
    assert_eq!(reviewable, vec![1, 3, 4, 5]);

    let mut edits: Vec<String> = session
        .reviewable_paragraphs()
        .iter()
        .map(|(_, p)| p.to_string())
        .collect();
    edits[3] = "Cargo: Auxiliar Administrativo desde 01/01/2020.".to_string();
    session.confirm_edits(Some(edits)).unwrap();

    let artifact = pipeline.finalize(&session, &DocxAssembler).unwrap();
    assert_eq!(artifact.file_name, "peticao_final.docx");
    assert_eq!(session.step(), Step::Finalize);

    let final_paragraphs = DocxTemplate.paragraphs_from_bytes(&artifact.bytes).unwrap();
    assert_eq!(final_paragraphs.len(), 4);
    assert_eq!(final_paragraphs[3], "Cargo: Auxiliar Administrativo desde 01/01/2020.");
}

#[test]
fn test_pages_are_joined_before_extraction() {
    let source = create_test_file(
        "Nome: Maria Silva\nMatrícula: 1\x0cCargo: Analista\x0cValor Líquido: R$ 10,00",
        ".txt",
    );

    let fields = Pipeline::new()
        .extract(&PlainTextSource, source.path())
        .unwrap();

    assert_eq!(fields.text("nome_completo"), Some("Maria Silva"));
    assert_eq!(fields.text("cargo"), Some("Analista"));
    assert_eq!(fields.amount("salario_liquido"), Some(10.0));
}

// =============================================================================
// Error handling
// =============================================================================

#[test]
fn test_unreadable_source_keeps_step_one() {
    let template = create_test_file("[NOME_COMPLETO]\n", ".txt");
    let mut session = WorkflowSession::new();

    let result = Pipeline::new().generate(
        &mut session,
        &PlainTextSource,
        Path::new("/nonexistent/holerite.txt"),
        &PlainTextTemplate,
        template.path(),
        &SupplementaryFields::new(),
    );

    assert!(matches!(result, Err(PeticaoError::SourceUnreadable { .. })));
    assert_eq!(session.step(), Step::Extract);
    assert!(session.extracted_fields.is_none());
}

#[test]
fn test_unreadable_template_keeps_step_one_with_cached_fields() {
    let source = create_test_file(HOLERITE, ".txt");
    let template = create_test_file("not a zip archive", ".docx");
    let mut session = WorkflowSession::new();

    let result = Pipeline::new().generate(
        &mut session,
        &PlainTextSource,
        source.path(),
        &DocxTemplate,
        template.path(),
        &SupplementaryFields::new(),
    );

    assert!(matches!(result, Err(PeticaoError::TemplateUnreadable { .. })));
    assert_eq!(session.step(), Step::Extract);
    assert!(session.generated_paragraphs.is_none());
    assert_eq!(
        session
            .extracted_fields
            .as_ref()
            .and_then(|f| f.text("nome_completo")),
        Some("Maria Silva")
    );
}

#[test]
fn test_generate_outside_step_one_rejected() {
    let source = create_test_file(HOLERITE, ".txt");
    let template = create_test_file("[NOME_COMPLETO]\n", ".txt");
    let pipeline = Pipeline::new();
    let mut session = WorkflowSession::new();

    pipeline
        .generate(
            &mut session,
            &PlainTextSource,
            source.path(),
            &PlainTextTemplate,
            template.path(),
            &SupplementaryFields::new(),
        )
        .unwrap();

    let again = pipeline.generate(
        &mut session,
        &PlainTextSource,
        source.path(),
        &PlainTextTemplate,
        template.path(),
        &SupplementaryFields::new(),
    );
    assert!(matches!(
        again,
        Err(PeticaoError::InvalidTransition { from: 2, to: 2, .. })
    ));
    assert_eq!(session.step(), Step::Review);
}

#[test]
fn test_substitution_precondition() {
    let mut extracted = FieldMap::new();
    extracted.insert("nome_completo", "Maria Silva");

    let result = Pipeline::new().substitute(
        &["[NOME_COMPLETO]".to_string()],
        &extracted,
        &SupplementaryFields::new(),
    );
    assert!(matches!(result, Err(PeticaoError::SubstitutionPrecondition(_))));
}

#[test]
fn test_finalize_before_step_three_fails() {
    let source = create_test_file(HOLERITE, ".txt");
    let template = create_test_file("[NOME_COMPLETO]\n", ".txt");
    let pipeline = Pipeline::new();
    let mut session = WorkflowSession::new();

    pipeline
        .generate(
            &mut session,
            &PlainTextSource,
            source.path(),
            &PlainTextTemplate,
            template.path(),
            &SupplementaryFields::new(),
        )
        .unwrap();

    assert!(pipeline.finalize(&session, &PlainTextAssembler).is_err());
}

// =============================================================================
// Back-navigation and re-generation
// =============================================================================

#[test]
fn test_back_and_regenerate_with_new_supplementary_fields() {
    let source = create_test_file(HOLERITE, ".txt");
    let template = create_test_file("Comarca de [COMARCA]\n", ".txt");
    let pipeline = Pipeline::new();
    let mut session = WorkflowSession::new();

    pipeline
        .generate(
            &mut session,
            &PlainTextSource,
            source.path(),
            &PlainTextTemplate,
            template.path(),
            &SupplementaryFields::defaults(),
        )
        .unwrap();
    assert_eq!(
        session.generated_paragraphs.as_ref().unwrap()[0],
        "Comarca de SÃO PAULO"
    );

    session.back();
    assert_eq!(session.step(), Step::Extract);

    let mut overrides = SupplementaryFields::new();
    overrides.set("comarca", "CAMPINAS").unwrap();
    pipeline
        .generate(
            &mut session,
            &PlainTextSource,
            source.path(),
            &PlainTextTemplate,
            template.path(),
            &SupplementaryFields::defaults().overlay(overrides),
        )
        .unwrap();

    assert_eq!(
        session.generated_paragraphs.as_ref().unwrap()[0],
        "Comarca de CAMPINAS"
    );
}

#[test]
fn test_session_records_inputs() {
    let source = create_test_file(HOLERITE, ".txt");
    let template = create_test_file("[NOME_COMPLETO]\n", ".txt");
    let mut session = WorkflowSession::new();

    Pipeline::new()
        .generate(
            &mut session,
            &PlainTextSource,
            source.path(),
            &PlainTextTemplate,
            template.path(),
            &SupplementaryFields::new(),
        )
        .unwrap();

    assert_eq!(session.source_path.as_deref(), Some(source.path()));
    assert_eq!(session.template_path.as_deref(), Some(template.path()));
    assert!(session.source_hash.as_deref().unwrap().starts_with("sha256:"));
}

#[test]
fn test_template_provider_is_read_only() {
    let template = create_test_file("[NOME_COMPLETO]\n", ".txt");
    let before = std::fs::read(template.path()).unwrap();

    let _ = PlainTextTemplate.paragraphs(template.path()).unwrap();
    assert_eq!(std::fs::read(template.path()).unwrap(), before);
}
