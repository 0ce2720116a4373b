//! Parser throughput benchmarks (§4.2).

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use wabc_par::Parser;
use wabc_util::{FileId, Handler};

fn parse(source: &str) {
    let handler = Handler::new();
    let _program = Parser::parse_str(black_box(source), FileId::DUMMY, &handler);
}

const FIBONACCI: &str = r#"
    func fib(n int) int {
        if n < 2 {
            return n;
        } else {
            return fib(n - 1) + fib(n - 2);
        }
    }

    func main() int {
        var i int = 0;
        while i < 10 {
            print fib(i);
            i = i + 1;
        }
        return 0;
    }
"#;

const ARITHMETIC: &str = "var x int = 1 + 2 * 3 - 4 / 2 < 10 && 1 == 1 || !false;";

fn bench_parser_fibonacci(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_fibonacci");
    group.throughput(Throughput::Bytes(FIBONACCI.len() as u64));
    group.bench_function("fibonacci", |b| b.iter(|| parse(FIBONACCI)));
    group.finish();
}

fn bench_parser_arithmetic(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_arithmetic");
    group.throughput(Throughput::Bytes(ARITHMETIC.len() as u64));
    group.bench_function("precedence_chain", |b| b.iter(|| parse(ARITHMETIC)));
    group.finish();
}

criterion_group!(benches, bench_parser_fibonacci, bench_parser_arithmetic);
criterion_main!(benches);
