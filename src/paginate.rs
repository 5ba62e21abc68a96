use crate::model::Page;

/// A unit of page content that is never split across pages.
pub trait ContentBlock {
    /// Rendered height in layout units, margins excluded.
    fn height(&self) -> f32;

    fn margin_top(&self) -> f32 {
        0.0
    }

    fn margin_bottom(&self) -> f32 {
        0.0
    }
}

impl ContentBlock for f32 {
    fn height(&self) -> f32 {
        *self
    }
}

impl<T: ContentBlock + ?Sized> ContentBlock for &T {
    fn height(&self) -> f32 {
        (**self).height()
    }

    fn margin_top(&self) -> f32 {
        (**self).margin_top()
    }

    fn margin_bottom(&self) -> f32 {
        (**self).margin_bottom()
    }
}

/// Vertical stacking model for pages of [`ContentBlock`]s: blocks are laid out
/// top to bottom inside the page padding, `gap` apart, and the bottom margin
/// of one block collapses with the top margin of the next.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StackLayout {
    pub padding_top: f32,
    pub padding_bottom: f32,
    pub gap: f32,
}

impl StackLayout {
    pub fn measure<B: ContentBlock>(&self, blocks: &[B]) -> f32 {
        let Some(first) = blocks.first() else {
            return 0.0;
        };
        let mut height = self.padding_top + first.margin_top() + first.height();
        let mut prev_margin_bottom = first.margin_bottom();
        for block in &blocks[1..] {
            height += self.gap + f32::max(prev_margin_bottom, block.margin_top()) + block.height();
            prev_margin_bottom = block.margin_bottom();
        }
        height + prev_margin_bottom + self.padding_bottom
    }
}

/// Greedily pack `blocks` into pages no taller than `page_height`.
///
/// `measure` is asked for the height of the whole candidate page each time a
/// block is tentatively appended, so layouts where blocks interact (collapsed
/// margins, shared padding) are measured exactly. A block that does not fit
/// starts a new page; a block too tall for an empty page gets a page of its
/// own. Blocks are never dropped, split or reordered.
pub fn paginate<B, I, F>(blocks: I, page_height: f32, mut measure: F) -> Vec<Page<B>>
where
    I: IntoIterator<Item = B>,
    F: FnMut(&[B]) -> f32,
{
    let mut pages: Vec<Page<B>> = Vec::new();
    let mut current: Vec<B> = Vec::new();

    for block in blocks {
        current.push(block);
        let measured = measure(&current);
        if measured <= page_height {
            continue;
        }

        if current.len() == 1 {
            log::debug!(
                "Page {} holds a single block taller than the page ({measured:.1} > {page_height:.1})",
                pages.len() + 1
            );
            continue;
        }

        let overflowing = current.split_off(current.len() - 1);
        log::debug!(
            "Page {} closed with {} blocks (candidate height {measured:.1} > {page_height:.1})",
            pages.len() + 1,
            current.len()
        );
        pages.push(Page {
            blocks: std::mem::replace(&mut current, overflowing),
        });
    }

    if !current.is_empty() {
        pages.push(Page { blocks: current });
    }
    pages
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Section {
        height: f32,
        margin: f32,
    }

    impl ContentBlock for Section {
        fn height(&self) -> f32 {
            self.height
        }

        fn margin_top(&self) -> f32 {
            self.margin
        }

        fn margin_bottom(&self) -> f32 {
            self.margin
        }
    }

    #[test]
    fn stack_layout_collapses_adjacent_margins() {
        let layout = StackLayout {
            padding_top: 10.0,
            padding_bottom: 20.0,
            gap: 0.0,
        };
        let blocks = [
            Section { height: 100.0, margin: 8.0 },
            Section { height: 50.0, margin: 16.0 },
        ];
        // 10 + 8 + 100 + max(8, 16) + 50 + 16 + 20
        assert_eq!(layout.measure(&blocks), 220.0);
    }

    #[test]
    fn stack_layout_of_nothing_is_zero() {
        let layout = StackLayout {
            padding_top: 10.0,
            padding_bottom: 10.0,
            gap: 4.0,
        };
        assert_eq!(layout.measure::<f32>(&[]), 0.0);
    }

    #[test]
    fn gap_only_between_blocks() {
        let layout = StackLayout {
            gap: 5.0,
            ..Default::default()
        };
        assert_eq!(layout.measure(&[10.0f32, 10.0, 10.0]), 40.0);
    }
}
