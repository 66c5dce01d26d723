// Copyright (C) 2024 Jelmer Vernooij <jelmer@samba.org>
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//    http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

#[cfg(test)]
mod tests {
    use crate::core::Category;
    use crate::driver::run;
    use crate::tests::test_utils::TestContext;
    use std::path::PathBuf;

    const CHAT_SERVICE: &str = "lib/services/chat_service.dart";
    const QR_SCANNER: &str = "lib/screens/qr/qr_scanner_screen.dart";
    const COLOR_PICKER: &str = "lib/screens/tools/color_picker_screen.dart";
    const IP_CALCULATOR: &str = "lib/screens/tools/ip_calculator_screen.dart";

    fn populated_tree() -> TestContext {
        let ctx = TestContext::new();
        ctx.write(
            CHAT_SERVICE,
            "class ChatService {\n  // TODO: retry on failure\n  void send() {}\n}\n",
        );
        ctx.write(
            QR_SCANNER,
            "class S {\n  // todo scan faster\n  void initState() {\n    _startCamera();\n  }\n}\n",
        );
        ctx.write(
            COLOR_PICKER,
            "class P {\n  int get argb => color.value;\n}\n",
        );
        let mut ip = String::new();
        for i in 1..19 {
            ip.push_str(&format!("// {}\n", i));
        }
        ip.push_str("  TextEditingController? _controller;\n  bool? _isClassful;\n");
        ctx.write(IP_CALCULATOR, &ip);
        ctx
    }

    #[test]
    fn test_full_run() {
        let ctx = populated_tree();
        let mut out = Vec::new();
        let report = run(&ctx.config(), &mut out).unwrap();

        let touched: Vec<(Category, PathBuf)> = report
            .modifications
            .iter()
            .map(|m| (m.category, m.path.clone()))
            .collect();
        assert_eq!(
            touched,
            vec![
                (Category::TodoComments, PathBuf::from(QR_SCANNER)),
                (Category::TodoComments, PathBuf::from(CHAT_SERVICE)),
                (Category::LateFields, PathBuf::from(IP_CALCULATOR)),
                (Category::DeprecatedMembers, PathBuf::from(COLOR_PICKER)),
                (Category::UnawaitedFutures, PathBuf::from(QR_SCANNER)),
            ]
        );
        // The QR scanner is counted once although two fixers touched it.
        assert_eq!(report.files_modified, 4);

        assert_eq!(
            ctx.read(CHAT_SERVICE),
            "class ChatService {\n  // TODO(copilot): retry on failure\n  void send() {}\n}\n"
        );
        assert_eq!(
            ctx.read(QR_SCANNER),
            "import 'package:flutter/foundation.dart';\nclass S {\n  // TODO(copilot): scan faster\n  void initState() {\n    unawaited(_startCamera());\n  }\n}\n"
        );
        assert_eq!(
            ctx.read(COLOR_PICKER),
            "class P {\n  // ignore: deprecated_member_use\n  int get argb => color.value;\n}\n"
        );
        let ip = ctx.read(IP_CALCULATOR);
        assert!(ip.ends_with(
            "  late final TextEditingController _controller;\n  late bool _isClassful;\n"
        ));

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Starting automated lint fixes...\n"));
        assert!(text.contains("Step 1: Fixing TODO comments...\n"));
        assert!(text.contains("Step 2: Fixing late fields...\n"));
        assert!(text.contains("Step 3: Fixing deprecated Color API...\n"));
        assert!(text.contains("Step 4: Wrapping unawaited futures...\n"));
        assert!(text.contains(&format!("  Fixed {} (1 change)\n", CHAT_SERVICE)));
        assert!(text.contains(&format!("  Fixed {} (2 changes)\n", IP_CALCULATOR)));
        assert!(text.contains("Modified 4 files\n"));
    }

    #[test]
    fn test_second_run_modifies_nothing() {
        let ctx = populated_tree();
        let config = ctx.config();
        let first = run(&config, &mut Vec::new()).unwrap();
        assert!(first.files_modified > 0);

        let snapshot: Vec<String> = [CHAT_SERVICE, QR_SCANNER, COLOR_PICKER, IP_CALCULATOR]
            .iter()
            .map(|path| ctx.read(path))
            .collect();

        let mut out = Vec::new();
        let second = run(&config, &mut out).unwrap();
        assert_eq!(second.files_modified, 0);
        assert!(second.modifications.is_empty());
        assert!(String::from_utf8(out).unwrap().contains("Modified 0 files\n"));

        let after: Vec<String> = [CHAT_SERVICE, QR_SCANNER, COLOR_PICKER, IP_CALCULATOR]
            .iter()
            .map(|path| ctx.read(path))
            .collect();
        assert_eq!(after, snapshot);
    }

    #[test]
    fn test_ip_calculator_calls_do_not_shift_late_field_window() {
        let ctx = TestContext::new();
        let mut ip = String::from("import 'package:flutter/material.dart';\n");
        for i in 2..18 {
            ip.push_str(&format!("// {}\n", i));
        }
        ip.push_str("  TextEditingController? _outside;\n");
        ip.push_str("  bool? _isClassful;\n");
        ip.push_str("  void _submit() {\n    _calculate();\n  }\n");
        ctx.write(IP_CALCULATOR, &ip);
        assert_eq!(
            ip.lines().nth(17),
            Some("  TextEditingController? _outside;")
        );

        let config = ctx.config();
        let first = run(&config, &mut Vec::new()).unwrap();
        assert_eq!(first.files_modified, 1);
        let after_first = ctx.read(IP_CALCULATOR);
        assert!(after_first.contains("  TextEditingController? _outside;\n"));
        assert!(after_first.contains("  late bool _isClassful;\n"));
        assert!(after_first.contains("    _calculate();\n"));

        let second = run(&config, &mut Vec::new()).unwrap();
        assert_eq!(second.files_modified, 0);
        assert!(second.modifications.is_empty());
        assert_eq!(ctx.read(IP_CALCULATOR), after_first);
    }

    #[test]
    fn test_missing_targets_skipped_silently() {
        let ctx = TestContext::new();
        ctx.write(CHAT_SERVICE, "// TODO: only file present\n");
        let mut out = Vec::new();
        let report = run(&ctx.config(), &mut out).unwrap();

        assert_eq!(report.files_modified, 1);
        // 7 other TODO targets, 1 late-field, 1 deprecated-member, 4 unawaited.
        assert_eq!(report.skipped.len(), 13);
        let text = String::from_utf8(out).unwrap();
        assert!(!text.contains("qr_scanner_screen"));
    }

    #[test]
    fn test_fixers_only_touch_their_own_files() {
        let ctx = TestContext::new();
        let mut content = String::new();
        for _ in 0..25 {
            content.push_str("  bool? _flag;\n");
        }
        content.push_str("  final v = color.value;\n");
        ctx.write(CHAT_SERVICE, &content);

        let report = run(&ctx.config(), &mut Vec::new()).unwrap();
        assert_eq!(report.files_modified, 0);
        assert_eq!(ctx.read(CHAT_SERVICE), content);
    }

    #[test]
    fn test_unreadable_target_aborts_run() {
        let ctx = TestContext::new();
        std::fs::create_dir_all(ctx.root().join(CHAT_SERVICE)).unwrap();
        ctx.write(
            "lib/services/security_service.dart",
            "// TODO: never reached\n",
        );

        let err = run(&ctx.config(), &mut Vec::new()).unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("todo-comments fixer failed on {}", CHAT_SERVICE)
        );
        assert_eq!(
            ctx.read("lib/services/security_service.dart"),
            "// TODO: never reached\n"
        );
    }
}
