//! Whole-file translation tests.
//!
//! Each test translates a small but complete Java program and snapshots
//! the output, so the interplay of line anchoring, priorities and
//! indentation is checked end to end.

use insta::assert_snapshot;
use jnade_translate::{translate, TranslateConfig, TranslateError};

fn tr(source: &str) -> String {
    translate(source, &TranslateConfig::default())
        .expect("source parses")
        .to_text()
}

#[test]
fn hello_with_package_imports_and_comment() {
    let out = tr(r#"package demo;

import java.util.Scanner;

// Greets the user.
public class Hello {
    public static void main(String[] args) {
        Scanner sc = new Scanner(System.in);
        String name = sc.nextLine();
        System.out.println("Hello, " + name + "!");
    }
}
"#);
    assert_snapshot!(out, @r"
    「demo」に所属。

    「Scanner」を取り込む。

    //Greets the user.
    クラス Hello
    　関数　メイン関数とは
    　　sc は 入力器。
    　　name は scのnextLine。
    　　「Hello, {name}!」と表示。
    　ここまで。
    ここまで。
    ");
}

#[test]
fn fields_constructor_and_methods() {
    let out = tr(r#"public class Counter {
    private int count;
    private final int limit = 10;

    public Counter(int start) {
        this.count = start;
    }

    /** Adds one. */
    public boolean increment() {
        if (count >= limit) {
            return false;
        }
        count++;
        return true;
    }

    public int sum(int[] values) {
        int total = 0;
        for (int v : values) {
            total += v;
        }
        return total;
    }
}
"#);
    assert_snapshot!(out, @r"
    クラス Counter
    　countとは整数。
    　limitは10と定める。

    　Counter(start)生成時
    　　自身のcount は start。
    　ここまで。

    　/** Adds one. */
    　関数 incrementとは
    　　もし、(count ≥ limit)ならば
    　　　偽を戻す。
    　　ここまで。
    　　count は (count + 1)。
    　　真を戻す。
    　ここまで。

    　関数 sum(values)とは
    　　total は 0。
    　　valuesの各要素をvへ取り出して繰り返す
    　　　total は (total + v)。
    　　ここまで。
    　　totalを戻す。
    　ここまで。
    ここまで。
    ");
}

#[test]
fn try_with_resources_loop_and_switch() {
    let out = tr(r#"import java.io.*;

class Files {
    void read(String path, int mode) {
        try (BufferedReader in = new BufferedReader(new FileReader(path))) {
            String line;
            while ((line = in.readLine()) != null) {
                System.out.println(line);
            }
        } catch (IOException e) {
            System.out.println("failed: " + e.getMessage());
        } finally {
            System.out.println("done");
        }
        switch (mode) {
            case 0:
                System.out.println("zero");
                break;
            default:
                System.out.println("other");
        }
    }
}
"#);
    assert_snapshot!(out, @r"
    「java.io.*」を取り込む。

    クラス Files
    　関数 read(path, mode)とは
    　　エラー監視
    　　　in は BufferedReader(new FileReader(path))生成。
    　　　lineとは文字列型。
    　　　((line は inのreadLine) ≠ null)の間
    　　　　lineと表示。
    　　　ここまで。
    　　エラー e が ファイルエラー ならば
    　　　「failed: {eのgetMessage}」と表示。
    　　後処理
    　　　「done」と表示。
    　　ここまで。
    　　modeで条件分岐：
    　　　0ならば：
    　　　　「zero」と表示。
    　　　　抜ける。
    　　　それ以外ならば：
    　　　　「other」と表示。
    　　ここまで。
    　ここまで。
    ここまで。
    ");
}

#[test]
fn library_idioms_and_conditions() {
    let out = tr(r#"class Clock {
    void show(List<String> list) {
        LocalDate today = LocalDate.now();
        LocalDate due = today.plusDays(7);
        long start = System.currentTimeMillis();
        int max = Math.max(a, b);
        String s = String.format("%d items", max);
        if (!list.isEmpty() && today.isBefore(due)) {
            System.out.println(s.substring(0, 3));
        }
    }
}
"#);
    assert_snapshot!(out, @r"
    クラス Clock
    　関数 show(list)とは
    　　today は 現在日時。
    　　due は todayに7日加算。
    　　start は システム時間。
    　　max は aとbの最大値。
    　　s は 「%d items」を「max」で形式指定。
    　　もし、(((listが空でない) かつ (todayがdueより過去)))ならば
    　　　sの1~3文字目の文字列と表示。
    　　ここまで。
    　ここまで。
    ここまで。
    ");
}

#[test]
fn inheritance_and_nested_types() {
    let out = tr(r#"interface Shape {
    double area();
}

class Circle extends Base implements Shape {
    static class Unit {
        String name;
    }

    public double area() {
        return r * r * 3.14;
    }
}
"#);
    assert_snapshot!(out, @r"
    抽象クラス Shape
    　関数 areaとは
    　ここまで。
    ここまで。

    クラス Circleは Baseを継承、Shapeを実装
    　クラス Unit
    　　nameとは文字列。
    　ここまで。

    　関数 areaとは
    　　((r * r) * 3.14)を戻す。
    　ここまで。
    ここまで。
    ");
}

#[test]
fn if_chain_with_returns_and_do_while() {
    let out = tr(r#"class Grade {
    String grade(int score) {
        do {
            score--;
        } while (score > 100);
        if (score >= 80) {
            return "A";
        } else if (score >= 60) {
            return "B";
        } else {
            return "C";
        }
    }
}
"#);
    assert_snapshot!(out, @r"
    クラス Grade
    　関数 grade(score)とは
    　　繰り返す
    　　　score は (score - 1)。
    　　(score > 100)の間ここまで。
    　　もし、(score ≥ 80)ならば
    　　　「A」を戻す。
    　　違えば、もし、(score ≥ 60)ならば
    　　　「B」を戻す。
    　　違えば
    　　　「C」を戻す。
    　　ここまで。
    　ここまで。
    ここまで。
    ");
}

#[test]
fn concatenation_grouping_and_negated_connective() {
    let out = tr(r#"class Report {
    void show(int x, int y) {
        System.out.println("a=" + x + "," + (y+1));
        int d = x - (y + 1);
        if (!(x > 0 && y > 0)) {
            d = 0;
        }
    }
}
"#);
    assert_snapshot!(out, @r"
    クラス Report
    　関数 show(x, y)とは
    　　「a={x},{(y+1)}」と表示。
    　　d は (x - (y + 1))。
    　　もし、(((x > 0) かつ (y > 0))でない)ならば
    　　　d は 0。
    　　ここまで。
    　ここまで。
    ここまで。
    ");
}

#[test]
fn syntax_error_produces_no_output() {
    let err = translate("class A {\n  void m( {\n}\n", &TranslateConfig::default()).unwrap_err();
    let TranslateError::Parse(errors) = err else {
        panic!("expected a parse error");
    };
    assert!(!errors.is_empty());
}

#[test]
fn indent_unit_from_toml() {
    let config = TranslateConfig::from_toml("[translate]\nindent_unit = \"  \"\n").unwrap();
    let out = translate(
        "class A {\n  void m() {\n    if (ok) {\n      go();\n    }\n  }\n}\n",
        &config,
    )
    .unwrap()
    .to_text();
    assert_eq!(
        out,
        "クラス A\n  関数 mとは\n    もし、(okが真)ならば\n      go。\n    ここまで。\n  ここまで。\nここまで。\n"
    );
}
