//! 序列遍历辅助

/// 对序列中每个元素按顺序调用一次回调，不累积结果、不提前退出
pub trait EachExt: IntoIterator + Sized {
    fn each<F>(self, mut f: F)
    where
        F: FnMut(Self::Item),
    {
        for item in self {
            f(item);
        }
    }
}

impl<I: IntoIterator> EachExt for I {}

#[cfg(test)]
mod tests {
    use super::*;

    struct IntContainer {
        value: i32,
    }

    #[test]
    fn each_visits_every_element_in_order() {
        let mut seen = Vec::new();

        vec![3, 1, 2].each(|n| seen.push(n));

        assert_eq!(seen, vec![3, 1, 2]);
    }

    #[test]
    fn each_can_mutate_through_references() {
        let mut items: Vec<IntContainer> = (0..3).map(|value| IntContainer { value }).collect();

        items.iter_mut().each(|c| c.value += 10);

        assert_eq!(
            items.iter().map(|c| c.value).collect::<Vec<_>>(),
            vec![10, 11, 12]
        );
    }

    #[test]
    fn each_on_empty_sequence_never_calls() {
        let mut calls = 0;

        Vec::<u8>::new().each(|_| calls += 1);

        assert_eq!(calls, 0);
    }
}
