//! IR generation throughput benchmarks (§4.4): builds the structured IR
//! for an already-parsed, already-analyzed program.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use wabc_ir::{verify_program, Builder};
use wabc_lex::Lexer;
use wabc_par::Parser;
use wabc_util::{FileId, Handler};

const FIBONACCI: &str = r#"
    const LAST int = 10;

    func fib(n int) int {
        if n < 2 {
            return n;
        } else {
            return fib(n - 1) + fib(n - 2);
        }
    }

    func main() int {
        var i int = 0;
        while i < LAST {
            print fib(i);
            i = i + 1;
        }
        return 0;
    }
"#;

fn build_ir(source: &str) {
    let handler = Handler::new();
    let tokens = Lexer::new(black_box(source), FileId::DUMMY, &handler).tokenize();
    let program = Parser::new(tokens, &handler).parse_program();
    let analysis = wabc_sem::analyze(&program, &handler);
    let ir = Builder::build(&program, &analysis.types);
    verify_program(&ir).unwrap();
}

fn bench_ir_fibonacci(c: &mut Criterion) {
    let mut group = c.benchmark_group("ir_fibonacci");
    group.throughput(Throughput::Bytes(FIBONACCI.len() as u64));
    group.bench_function("fibonacci", |b| b.iter(|| build_ir(FIBONACCI)));
    group.finish();
}

criterion_group!(benches, bench_ir_fibonacci);
criterion_main!(benches);
