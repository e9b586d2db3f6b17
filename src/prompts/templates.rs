//! 提示词模板与少样本示例
//!
//! 系统模板按名称静态注册，少样本示例是固定顺序的（错误句, 校正句）对，
//! 全部为韩语文法校正数据。

use phf::phf_map;

/// 按名称注册的系统提示词模板
pub static TEMPLATES: phf::Map<&'static str, &'static str> = phf_map! {
    "basic" => "당신은 한국어 맞춤법 교정 전문가입니다. 입력된 문장의 띄어쓰기, 철자, 조사, 어미, 문장 부호 오류를 교정하세요. 교정된 문장만 출력하고 다른 설명은 하지 마세요.",
    "detailed" => "당신은 한국어 맞춤법 교정 전문가입니다. 입력된 문장에서 다음 오류를 찾아 교정하세요: 1) 띄어쓰기 오류 2) 철자 오류 3) 조사 오류 4) 어미 오류 5) 문장 부호 오류. 원문의 어투와 의미는 그대로 유지하고, 교정된 문장만 출력하세요.",
    "minimal" => "다음 한국어 문장의 오류를 교정해 주세요. 교정된 문장만 출력하세요.",
};

/// 默认模板名称
pub const DEFAULT_TEMPLATE: &str = "basic";

/// 按名称查找模板
pub fn get(name: &str) -> Option<&'static str> {
    TEMPLATES.get(name).copied()
}

/// 固定的少样本示例：（错误句, 校正句）
///
/// 顺序固定，位于系统消息之后、变量消息之前。
pub const EXAMPLE_PAIRS: &[(&str, &str)] = &[
    // 띄어쓰기, 철자, 문장 부호 오류
    (
        "뭐든과하지만 안으면조은것같타요",
        "뭐든 과하지만 않으면 좋은 것 같아요.",
    ),
    // 띄어쓰기, 어미 오류
    (
        "증가와 감소 구간을정하는건데요기서 궁금한점이있씁니다.",
        "증가와 감소 구간을 정하는 건데 여기서 궁금한 점이 있습니다.",
    ),
    // 철자, 조사, 띄어쓰기, 문장 부호 오류
    (
        "전재가실제로 참이라는 근거가지문과보기어디예예도나타나지않았기때문입니다.",
        "전제가 실제로 참이라는 근거가 지문과 보기 어디에도 나타나지 않았기 때문입니다.",
    ),
    // 조사, 어미, 띄어쓰기 오류
    (
        "저더비대면이라가지를 못 하구잇네요",
        "저도 비대면이라 가지를 못 하고 있네요.",
    ),
    // 띄어쓰기, 철자 오류
    (
        "거기에 내공문서 윗조해서도도보내더라.",
        "거기에 내 공문서 위조해서도 보내더라.",
    ),
    // 띄어쓰기, 철자, 어미, 조사 오류
    (
        "풀이과정깔 끔해 질거에오",
        "풀이 과정이 깔끔해질 거예요.",
    ),
    // 띄어쓰기, 철자, 어미, 문장 부호 오류
    (
        "그래서 주변에 필요한사람들있으면해주려고. 통합과학 기반으로해서 심화적으로 다루듯 공부햇어요! 논술전형에대한유익한정보들 많이올려주시면 감사하게슴니다 내일 밤에 끝낸거 인증 안하면 욕해주세요 ",
        "그래서 주변에 필요한 사람들 있으면 해주려고. 통합과학 기반으로 해서 심화적으로 다루듯 공부했어요! 논술전형에 대한 유익한 정보들 많이 올려주시면 감사하겠습니다. 내일 밤에 끝낸 거 인증 안 하면 욕해주세요. ",
    ),
    // 맞춤법, 띄어쓰기 오류
    (
        "이문장이무엇을 이미하는지 잘모르겠습니다. 언래라면 확인하구 너머가야하는것이죠? 예비시행 문제 보니까 저희떄랑은 번호가 좀 바뀐거 같더라구요.",
        "이 문장이 무엇을 의미하는지 잘 모르겠습니다. 원래라면 확인하고 넘어가야 하는 것이죠? 예비시행 문제 보니까 저희 때랑은 번호가 좀 바뀐 거 같더라고요.",
    ),
    // 띄어쓰기, 철자, 조사, 어미 오류
    (
        "내가 풀땐 나 말곤 아무도 못알아보는데 글씨 대박이시네요. 학교가 내신챙기기 쉬운 곳이라 정시공부 어떻게 해야할지 고민 중이였거든요.",
        "내가 풀 땐 나 말곤 아무도 못 알아보는데 글씨가 대박이시네요. 학교가 내신 챙기기 쉬운 곳이라 정시 공부를 어떻게 해야 할지 고민 중이었거든요.",
    ),
    // 철자, 띄어쓰기 오류
    (
        "토론은 지두 교수님이 별 말 안헸다.",
        "토론은 지도 교수님이 별말 안 했다.",
    ),
    // 철자, 띄어쓰기 오류
    (
        "담단원으로 너머ㅓ가야겟어요...",
        "다음 단원으로 넘어가야겠어요...",
    ),
    // 띄어쓰기, 철자, 어미, 문장 부호 오류
    (
        "벼랑끝에 서 있따는 생각으루 해야 한다구 하시더랔",
        "벼랑 끝에 서 있다는 생각으로 해야 한다고 하시더라.",
    ),
    // 조사, 철자, 띄어쓰기, 문장 부호 오류
    (
        "나혼자선줄알았는데 알고보니 다들오고있던거엿어요",
        "나 혼자선 줄 알았는데, 알고 보니 다들 오고 있던 거였어요.",
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_template_exists() {
        assert!(get(DEFAULT_TEMPLATE).is_some());
    }

    #[test]
    fn test_unknown_template_is_none() {
        assert!(get("does-not-exist").is_none());
    }

    #[test]
    fn test_example_pairs_nonempty() {
        assert_eq!(EXAMPLE_PAIRS.len(), 13);
        for (err, cor) in EXAMPLE_PAIRS {
            assert!(!err.is_empty());
            assert!(!cor.is_empty());
        }
    }
}
