//! Extraction and substitution benchmarks.
//!
//! Measures extraction over statements of increasing length and
//! substitution over templates of increasing paragraph count.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use peticao::{FieldExtractor, FieldMap, TemplateSubstitutor};

const STATEMENT: &str = "Nome: Maria Silva\n\
Matrícula: 12345\n\
Cargo: Analista\n\
Mês/Ano: 03/2024\n\
Salário Base ........ R$ 3.500,00\n\
INSS ................ R$ 385,00\n\
IRRF ................ R$ 215,00\n\
Valor Líquido: R$ 2.900,00\n";

/// A statement preceded by `filler` lines of unrelated text.
fn generate_statement(filler: usize) -> String {
    let mut text = String::new();
    for i in 0..filler {
        text.push_str(&format!("Rubrica {:04} ........ {:.2}\n", i, i as f64 * 1.5));
    }
    text.push_str(STATEMENT);
    text
}

fn generate_template(paragraphs: usize) -> Vec<String> {
    (0..paragraphs)
        .map(|i| match i % 4 {
            0 => "Eu, [NOME_COMPLETO], [NACIONALIDADE], [ESTADO_CIVIL].".to_string(),
            1 => "Recebo [SALARIO_BASE], com descontos de [VALOR_INSS] e [VALOR_IRRF].".to_string(),
            2 => String::new(),
            _ => format!("Parágrafo {} sem marcadores.", i),
        })
        .collect()
}

fn fields() -> FieldMap {
    let mut fields = FieldExtractor::new().extract(STATEMENT);
    fields.insert("nacionalidade", "brasileira");
    fields.insert("estado_civil", "casada");
    fields
}

fn bench_extract(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract");
    let extractor = FieldExtractor::new();

    for filler in [0, 100, 1_000].iter() {
        let text = generate_statement(*filler);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::new("filler_lines", filler), &text, |b, text| {
            b.iter(|| extractor.extract(black_box(text)))
        });
    }

    group.finish();
}

fn bench_substitute(c: &mut Criterion) {
    let mut group = c.benchmark_group("substitute");
    let substitutor = TemplateSubstitutor::new();
    let fields = fields();

    for paragraphs in [10, 100, 1_000].iter() {
        let template = generate_template(*paragraphs);
        group.throughput(Throughput::Elements(*paragraphs as u64));
        group.bench_with_input(
            BenchmarkId::new("paragraphs", paragraphs),
            &template,
            |b, template| b.iter(|| substitutor.substitute(black_box(template), &fields)),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_extract, bench_substitute);
criterion_main!(benches);
